use std::collections::{BTreeSet, HashMap};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;
use rank_inflect::Inflect;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    APEX, Behavior, CAN, Capability, CapabilityRegistry, FLOOR, Group, HierarchyGraph, Namespace,
    Plugin, RankHierarchyError, Resolved, Result, Source, behavior, resolve,
};

/// A built hierarchy: the immutable graph plus one capability registry per
/// group.
///
/// Each registry sits behind its own lock, so writers to different groups
/// never contend and a reader only ever sees a complete definition.
pub(crate) struct Hierarchy {
    namespace: Namespace,
    graph: HierarchyGraph,
    registries: HashMap<String, RwLock<CapabilityRegistry>>,
    inflector: Arc<dyn Inflect>,
}

impl Hierarchy {
    pub(crate) fn new(
        namespace: Namespace,
        graph: HierarchyGraph,
        inflector: Arc<dyn Inflect>,
    ) -> Self {
        let registries = graph
            .names()
            .map(|name| (name.to_owned(), RwLock::new(CapabilityRegistry::default())))
            .collect();

        Self {
            namespace,
            graph,
            registries,
            inflector,
        }
    }

    pub(crate) fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub(crate) fn graph(&self) -> &HierarchyGraph {
        &self.graph
    }

    fn registry(&self, group: &str) -> Result<&RwLock<CapabilityRegistry>> {
        self.registries
            .get(group)
            .ok_or_else(|| RankHierarchyError::UnknownGroup {
                group: group.to_owned(),
            })
    }

    fn lookup(&self, group: &str, capability: &str) -> Option<(Capability, Source)> {
        self.registries
            .get(group)
            .and_then(|registry| registry.read().lookup(capability))
    }

    pub(crate) fn resolve(&self, group: &str, capability: &str) -> Option<Resolved> {
        resolve(&self.graph, group, capability, |node, name| {
            self.lookup(node, name)
        })
    }

    /// Every capability name `group` can resolve through the generic search,
    /// sorted.
    pub(crate) fn capabilities(&self, group: &str) -> BTreeSet<String> {
        let collect = |node: &str, names: &mut BTreeSet<String>| {
            if let Some(registry) = self.registries.get(node) {
                names.extend(registry.read().names().map(str::to_owned));
            }
        };

        let mut names = BTreeSet::new();
        if group == FLOOR {
            collect(FLOOR, &mut names);
            names.remove(CAN);
        } else {
            for node in self.graph.walk(group) {
                collect(node, &mut names);
            }
        }
        names
    }

    /// Register `group`'s own name, and its singular and plural forms, as
    /// bare permissions on it.
    pub(crate) fn register_own_name(&self, group: &str) -> Result<()> {
        let (singular, plural) = self.inflector.forms(group);
        let mut registry = self.registry(group)?.write();
        registry.define(group, Capability::Permission);
        registry.define(singular, Capability::Permission);
        registry.define(plural, Capability::Permission);
        Ok(())
    }

    pub(crate) fn grant_permissions(
        &self,
        operation: &'static str,
        group: &str,
        permissions: Vec<String>,
    ) -> Result<()> {
        if permissions.is_empty() {
            return Err(RankHierarchyError::EmptyPayload { operation });
        }

        let mut registry = self.registry(group)?.write();
        for permission in permissions {
            debug!(
                namespace = %self.namespace,
                group = %group,
                permission = %permission,
                "Granting permission"
            );
            registry.define(permission, Capability::Permission);
        }
        Ok(())
    }

    pub(crate) fn grant_abilities(
        &self,
        operation: &'static str,
        group: &str,
        abilities: Vec<(String, Behavior)>,
    ) -> Result<()> {
        if abilities.is_empty() {
            return Err(RankHierarchyError::EmptyPayload { operation });
        }

        let mut registry = self.registry(group)?.write();
        for (ability, behavior) in abilities {
            debug!(
                namespace = %self.namespace,
                group = %group,
                ability = %ability,
                "Granting ability"
            );
            registry.define(ability, Capability::Ability(behavior));
        }
        Ok(())
    }

    pub(crate) fn install_plugins(
        &self,
        operation: &'static str,
        group: &str,
        plugins: Vec<Plugin>,
    ) -> Result<()> {
        if plugins.is_empty() {
            return Err(RankHierarchyError::EmptyPayload { operation });
        }

        if let Some(plugin) = plugins.iter().find(|plugin| plugin.is_empty()) {
            return Err(RankHierarchyError::EmptyPlugin {
                plugin: plugin.name().to_owned(),
            });
        }

        let mut registry = self.registry(group)?.write();
        for plugin in plugins {
            debug!(
                namespace = %self.namespace,
                group = %group,
                plugin = %plugin.name(),
                "Installing plugin"
            );
            registry.install(plugin);
        }
        Ok(())
    }
}

impl Debug for Hierarchy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hierarchy")
            .field("namespace", &self.namespace)
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

/// Handle on a whole hierarchy, as returned by
/// [`Hierarchies::build`](crate::Hierarchies::build).
///
/// This is the only way to produce [`Group`] handles and the only receiver
/// for extension operations that target an arbitrary named group. Cloning is
/// cheap; every clone refers to the same hierarchy.
#[derive(Clone)]
pub struct HierarchyHandle {
    hierarchy: Arc<Hierarchy>,
}

impl HierarchyHandle {
    pub(crate) fn new(hierarchy: Arc<Hierarchy>) -> Self {
        Self { hierarchy }
    }

    /// Namespace the hierarchy is registered under.
    pub fn namespace(&self) -> &Namespace {
        self.hierarchy.namespace()
    }

    /// The underlying graph.
    pub fn graph(&self) -> &HierarchyGraph {
        self.hierarchy.graph()
    }

    /// Obtain a handle for `name`.
    ///
    /// Unknown names do not fail: the floor group is substituted and a warning
    /// is logged. Instantiating a handle registers the singular and plural
    /// forms of the group's name as permissions on it.
    pub fn group(&self, name: &str) -> Group {
        let name = if self.group_exists(name) {
            name
        } else {
            warn!(
                namespace = %self.namespace(),
                group = %name,
                "Unknown group; substituting '{FLOOR}'"
            );
            FLOOR
        };

        if let Err(error) = self.hierarchy.register_own_name(name) {
            // Unreachable for names the graph contains
            warn!(group = %name, error = %error, "Could not register group name");
        }

        Group::new(self.hierarchy.clone(), name.to_owned())
    }

    /// Handle for the apex group.
    pub fn apex(&self) -> Group {
        self.group(APEX)
    }

    /// Handle for the floor group.
    pub fn floor(&self) -> Group {
        self.group(FLOOR)
    }

    /// Whether `name` is a group of this hierarchy. Sentinels included.
    pub fn group_exists(&self, name: &str) -> bool {
        self.graph().contains(name)
    }

    /// Names of every group, sentinels included, sorted.
    pub fn list_groups(&self) -> Vec<String> {
        self.graph().names().map(str::to_owned).collect()
    }

    /// Subordinates of `name` in resolution order, or `None` for unknown
    /// groups.
    pub fn subordinates(&self, name: &str) -> Option<&[String]> {
        self.graph().node(name).map(|node| node.subordinates())
    }

    /// Groups that are nobody's subordinate, sorted.
    pub fn roots(&self) -> Vec<String> {
        self.graph().roots().into_iter().map(str::to_owned).collect()
    }

    /// Whether `group` sits anywhere beneath `ancestor`.
    ///
    /// Not implemented; always fails with
    /// [`RankHierarchyError::Unimplemented`].
    pub fn is_descendant(&self, _group: &str, _ancestor: &str) -> Result<bool> {
        Err(RankHierarchyError::Unimplemented {
            operation: "is_descendant",
        })
    }

    /// Grant bare permissions to the named group.
    pub fn setup_permissions<I, S>(&self, group: &str, permissions: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hierarchy.grant_permissions(
            "setup_permissions",
            group,
            permissions.into_iter().map(Into::into).collect(),
        )
    }

    /// Grant abilities to the named group.
    pub fn setup_abilities<I, S>(&self, group: &str, abilities: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Behavior)>,
        S: Into<String>,
    {
        self.hierarchy.grant_abilities(
            "setup_abilities",
            group,
            abilities
                .into_iter()
                .map(|(name, behavior)| (name.into(), behavior))
                .collect(),
        )
    }

    /// Grant a single ability, given as a closure, to the named group.
    pub fn setup_ability<F>(&self, group: &str, ability: impl Into<String>, logic: F) -> Result<()>
    where
        F: Fn(&Group, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.hierarchy
            .grant_abilities("setup_ability", group, vec![(ability.into(), behavior(logic))])
    }

    /// Install plugin bundles on the named group.
    pub fn setup_plugins<I>(&self, group: &str, plugins: I) -> Result<()>
    where
        I: IntoIterator<Item = Plugin>,
    {
        self.hierarchy
            .install_plugins("setup_plugins", group, plugins.into_iter().collect())
    }
}

impl Debug for HierarchyHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HierarchyHandle")
            .field(self.namespace())
            .finish()
    }
}
