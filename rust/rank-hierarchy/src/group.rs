use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde_json::Value;

use crate::hierarchy::Hierarchy;
use crate::{
    APEX, Behavior, FLOOR, Namespace, Plugin, RankHierarchyError, Resolved, Result, behavior,
};

/// A group within a particular hierarchy.
///
/// Obtained from [`HierarchyHandle::group`](crate::HierarchyHandle::group).
/// The handle does not own the graph; it shares the hierarchy it was created
/// from, and keeps seeing that hierarchy even if its namespace is rebuilt.
///
/// Extension operations on a `Group` only ever touch this group's own
/// registry. Anything granted here is visible to every senior group that can
/// reach it.
#[derive(Clone)]
pub struct Group {
    hierarchy: Arc<Hierarchy>,
    name: String,
}

impl Group {
    pub(crate) fn new(hierarchy: Arc<Hierarchy>, name: String) -> Self {
        Self { hierarchy, name }
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace of the hierarchy this group belongs to.
    pub fn namespace(&self) -> &Namespace {
        self.hierarchy.namespace()
    }

    /// Whether this is the apex group.
    pub fn is_apex(&self) -> bool {
        self.name == APEX
    }

    /// Whether this is the floor group.
    pub fn is_floor(&self) -> bool {
        self.name == FLOOR
    }

    /// Whether this group may perform `capability`.
    pub fn can(&self, capability: &str) -> bool {
        self.capability(capability).is_some()
    }

    /// Resolve `capability` for this group, with the definition that won.
    pub fn capability(&self, capability: &str) -> Option<Resolved> {
        self.hierarchy.resolve(&self.name, capability)
    }

    /// Exercise `capability` as this group.
    ///
    /// Bare permissions perform to [`Value::Null`]. Fails with
    /// [`RankHierarchyError::NotCapable`] if the group does not hold the
    /// capability.
    pub fn perform(&self, capability: &str, arguments: &[Value]) -> Result<Value> {
        let resolved = self
            .capability(capability)
            .ok_or_else(|| RankHierarchyError::NotCapable {
                group: self.name.clone(),
                capability: capability.to_owned(),
            })?;

        Ok(resolved.capability.perform(self, arguments))
    }

    /// Every capability name this group can resolve, sorted.
    ///
    /// The apex can resolve anything; this lists only what is actually
    /// defined somewhere beneath it.
    pub fn capabilities(&self) -> BTreeSet<String> {
        self.hierarchy.capabilities(&self.name)
    }

    /// Grant bare permissions to this group.
    pub fn setup_permissions<I, S>(&self, permissions: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hierarchy.grant_permissions(
            "setup_permissions",
            &self.name,
            permissions.into_iter().map(Into::into).collect(),
        )
    }

    /// Grant abilities to this group.
    pub fn setup_abilities<I, S>(&self, abilities: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Behavior)>,
        S: Into<String>,
    {
        self.hierarchy.grant_abilities(
            "setup_abilities",
            &self.name,
            abilities
                .into_iter()
                .map(|(name, behavior)| (name.into(), behavior))
                .collect(),
        )
    }

    /// Grant a single ability, given as a closure, to this group.
    pub fn setup_ability<F>(&self, ability: impl Into<String>, logic: F) -> Result<()>
    where
        F: Fn(&Group, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.hierarchy.grant_abilities(
            "setup_ability",
            &self.name,
            vec![(ability.into(), behavior(logic))],
        )
    }

    /// Install plugin bundles on this group.
    pub fn setup_plugins<I>(&self, plugins: I) -> Result<()>
    where
        I: IntoIterator<Item = Plugin>,
    {
        self.hierarchy
            .install_plugins("setup_plugins", &self.name, plugins.into_iter().collect())
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.hierarchy, &other.hierarchy) && self.name == other.name
    }
}

impl Eq for Group {}

impl Debug for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("namespace", self.namespace())
            .field("name", &self.name)
            .finish()
    }
}
