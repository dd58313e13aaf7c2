#![warn(missing_docs)]

//! Inheritance-based capability resolution over a hierarchy of groups.
//!
//! A hierarchy is a directed graph of named groups, where an edge means
//! "senior to". A group can do whatever is registered on it, plus whatever any
//! group reachable beneath it can do. Two groups are always present: the apex
//! ([`APEX`], `superuser`) can do everything, and the floor ([`FLOOR`],
//! `base`) can do only what is registered on it directly.
//!
//! Hierarchies are built from a [`HierarchyDescription`] and registered in
//! [`Hierarchies`] under a [`Namespace`]. The resulting [`HierarchyHandle`]
//! hands out [`Group`] handles, which answer capability queries:
//!
//! ```rust
//! use rank_hierarchy::{Hierarchies, HierarchyDescription, Plugin};
//! use serde_json::json;
//!
//! # fn main() -> rank_hierarchy::Result<()> {
//! let hierarchies = Hierarchies::new();
//! let agency = hierarchies.build(
//!     HierarchyDescription::new()
//!         .with("superuser", ["spymasters"])
//!         .with("spymasters", ["spies"]),
//!     Some("agency"),
//! )?;
//!
//! let spies = agency.group("spies");
//! spies.setup_ability("encode_text", |_, arguments| json!(arguments.len()))?;
//! spies.setup_plugins([Plugin::new("wetwork").with("assassinate", |_, _| json!("done"))])?;
//!
//! let spymasters = agency.group("spymasters");
//! assert!(spymasters.can("spy"));
//! assert!(spymasters.can("assassinate"));
//! assert_eq!(spymasters.perform("encode_text", &[json!("a")])?, json!(1));
//! assert!(!agency.floor().can("encode_text"));
//! # Ok(())
//! # }
//! ```
//!
//! Capabilities are either bare permissions or abilities carrying a
//! [`Behavior`]. They can be granted one at a time, in batches, or as named
//! [`Plugin`] bundles; a definition on a group always shadows one found
//! further down.

mod capability;
pub use capability::*;

mod description;
pub use description::*;

mod error;
pub use error::*;

mod graph;
pub use graph::*;

mod group;
pub use group::*;

mod hierarchies;
pub use hierarchies::*;

mod hierarchy;
pub use hierarchy::HierarchyHandle;

mod namespace;
pub use namespace::*;

mod registry;
pub use registry::*;

mod resolve;
pub use resolve::*;
