use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Key isolating one hierarchy from the others registered alongside it.
///
/// The default namespace is the empty string and always resolves to a
/// hierarchy, even before anything has been built under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The namespace as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the default (unnamespaced) key.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Option<&str>> for Namespace {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_default() {
            write!(f, "<default>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
