#![warn(missing_docs)]

//! Noun inflection for group names.
//!
//! Every group in a hierarchy answers affirmatively for its own name in both
//! singular and plural form. This crate provides the text transform that
//! derives those two forms. It is deliberately small: the [`Inflect`] trait is
//! the seam, and [`English`] covers the regular English rules plus a short
//! table of irregular and uncountable nouns.
//!
//! ```rust
//! use rank_inflect::{English, Inflect};
//!
//! assert_eq!(English.singular("spies"), "spy");
//! assert_eq!(English.plural("spy"), "spies");
//! assert_eq!(English.plural("spies"), "spies");
//! ```

mod english;
pub use english::*;

/// A text transform producing the singular and plural forms of a noun.
///
/// Both operations accept either form as input, so `plural("spies")` is
/// `"spies"` and `singular("spy")` is `"spy"`.
pub trait Inflect: Send + Sync {
    /// The singular form of `word`.
    fn singular(&self, word: &str) -> String;

    /// The plural form of `word`.
    fn plural(&self, word: &str) -> String;

    /// Both forms, singular first.
    fn forms(&self, word: &str) -> (String, String) {
        (self.singular(word), self.plural(word))
    }
}
