use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::Group;

/// Executable logic bound to a capability.
///
/// Invoked with the group that exercises the capability and any arguments
/// supplied by the caller.
pub type Behavior = Arc<dyn Fn(&Group, &[Value]) -> Value + Send + Sync>;

/// Wrap a closure as a [`Behavior`].
pub fn behavior<F>(logic: F) -> Behavior
where
    F: Fn(&Group, &[Value]) -> Value + Send + Sync + 'static,
{
    Arc::new(logic)
}

/// What a group holds under a capability name.
#[derive(Clone)]
pub enum Capability {
    /// The group may, and nothing runs when it does.
    Permission,
    /// The group may, and doing so runs the behavior.
    Ability(Behavior),
}

impl Capability {
    /// Create an ability from a closure.
    pub fn ability<F>(logic: F) -> Self
    where
        F: Fn(&Group, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Ability(behavior(logic))
    }

    /// Whether this is a bare permission.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission)
    }

    /// The behavior, if this is an ability.
    pub fn behavior(&self) -> Option<&Behavior> {
        match self {
            Self::Permission => None,
            Self::Ability(behavior) => Some(behavior),
        }
    }

    /// Exercise the capability as `group`. A bare permission performs to
    /// [`Value::Null`].
    pub fn perform(&self, group: &Group, arguments: &[Value]) -> Value {
        match self {
            Self::Permission => Value::Null,
            Self::Ability(behavior) => behavior(group, arguments),
        }
    }
}

impl Debug for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permission => f.write_str("Permission"),
            Self::Ability(_) => f.write_str("Ability(..)"),
        }
    }
}

impl From<Behavior> for Capability {
    fn from(value: Behavior) -> Self {
        Self::Ability(value)
    }
}

/// A named bundle of abilities attached to a group as a unit.
///
/// ```rust
/// use rank_hierarchy::Plugin;
/// use serde_json::{Value, json};
///
/// let plugin = Plugin::new("wetwork").with("assassinate", |_, arguments| {
///     let target = arguments.first().and_then(Value::as_str).unwrap_or("nobody");
///     json!(format!("{target} was eliminated"))
/// });
///
/// assert_eq!(plugin.name(), "wetwork");
/// assert!(plugin.get("assassinate").is_some());
/// ```
#[derive(Clone)]
pub struct Plugin {
    name: String,
    abilities: IndexMap<String, Behavior>,
}

impl Plugin {
    /// Create an empty bundle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: IndexMap::new(),
        }
    }

    /// Add an ability to the bundle, replacing one of the same name.
    pub fn with<F>(self, capability: impl Into<String>, logic: F) -> Self
    where
        F: Fn(&Group, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.with_behavior(capability, behavior(logic))
    }

    /// Add an already wrapped behavior to the bundle.
    pub fn with_behavior(mut self, capability: impl Into<String>, behavior: Behavior) -> Self {
        self.abilities.insert(capability.into(), behavior);
        self
    }

    /// Name of the bundle.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a member of the bundle.
    pub fn get(&self, capability: &str) -> Option<&Behavior> {
        self.abilities.get(capability)
    }

    /// Names of the bundle's members in insertion order.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.abilities.keys().map(String::as_str)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Whether the bundle has no members.
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl Debug for Plugin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("abilities", &self.abilities.keys().collect::<Vec<_>>())
            .finish()
    }
}
