#![warn(missing_docs)]

//! Inspection tools for rank hierarchies.
//!
//! [`render`] lays a built hierarchy out as an indented tree of group names,
//! apex first. The `diagnose` binary does the same for a hierarchy described
//! in a JSON configuration file:
//!
//! ```bash
//! cargo run --bin diagnose -- agency.json
//! ```
//!
//! where `agency.json` looks like:
//!
//! ```json
//! {
//!   "namespace": "agency",
//!   "groups": {
//!     "superuser": ["spymasters", "politicians"],
//!     "spymasters": ["spies", "moles"]
//!   }
//! }
//! ```
//!
//! Set `RUST_LOG=debug` to see each step of the build.

mod cli;
pub use cli::*;

mod render;
pub use render::*;
