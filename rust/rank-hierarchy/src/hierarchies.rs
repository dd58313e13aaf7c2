use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use dashmap::DashMap;
use rank_inflect::{English, Inflect};
use tracing::debug;

use crate::hierarchy::Hierarchy;
use crate::{
    HierarchyConfig, HierarchyDescription, HierarchyGraph, HierarchyHandle, Namespace, Result,
};

/// The process-wide registry of hierarchies, keyed by namespace.
///
/// Building a hierarchy in a namespace replaces whatever was registered there
/// before. Handles obtained earlier keep the hierarchy they were created from.
///
/// A fresh registry already holds a hierarchy in the default namespace made of
/// the apex and the floor only.
pub struct Hierarchies {
    entries: DashMap<Namespace, Arc<Hierarchy>>,
    inflector: Arc<dyn Inflect>,
}

impl Hierarchies {
    /// Create a registry that derives group self-names with [`English`].
    pub fn new() -> Self {
        Self::with_inflector(English)
    }

    /// Create a registry with a custom inflector.
    pub fn with_inflector<I>(inflector: I) -> Self
    where
        I: Inflect + 'static,
    {
        let hierarchies = Self {
            entries: DashMap::new(),
            inflector: Arc::new(inflector),
        };
        hierarchies.entries.insert(
            Namespace::default(),
            Arc::new(hierarchies.sentinels(Namespace::default())),
        );
        hierarchies
    }

    fn sentinels(&self, namespace: Namespace) -> Hierarchy {
        Hierarchy::new(namespace, HierarchyGraph::sentinels(), self.inflector.clone())
    }

    /// Compile `description` and register it under `namespace` (the default
    /// namespace when `None`), replacing any earlier hierarchy there.
    pub fn build(
        &self,
        description: HierarchyDescription,
        namespace: Option<&str>,
    ) -> Result<HierarchyHandle> {
        let namespace = Namespace::from(namespace);
        let graph = HierarchyGraph::build(&description)?;

        debug!(
            namespace = %namespace,
            groups = graph.len(),
            "Building hierarchy"
        );

        let hierarchy = Arc::new(Hierarchy::new(
            namespace.clone(),
            graph,
            self.inflector.clone(),
        ));
        self.entries.insert(namespace, hierarchy.clone());

        Ok(HierarchyHandle::new(hierarchy))
    }

    /// Build from a parsed configuration document.
    pub fn build_from_config(&self, config: HierarchyConfig) -> Result<HierarchyHandle> {
        self.build(config.groups, config.namespace.as_deref())
    }

    /// The hierarchy registered under `namespace`, if any.
    pub fn hierarchy(&self, namespace: Option<&str>) -> Option<HierarchyHandle> {
        self.entries
            .get(&Namespace::from(namespace))
            .map(|entry| HierarchyHandle::new(entry.value().clone()))
    }

    /// The hierarchy of the default namespace.
    pub fn default_hierarchy(&self) -> HierarchyHandle {
        let entry = self
            .entries
            .entry(Namespace::default())
            .or_insert_with(|| Arc::new(self.sentinels(Namespace::default())));
        HierarchyHandle::new(entry.value().clone())
    }

    /// Registered namespaces, sorted. The default namespace sorts first.
    pub fn namespaces(&self) -> Vec<Namespace> {
        let mut namespaces: Vec<Namespace> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        namespaces.sort();
        namespaces
    }
}

impl Default for Hierarchies {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Hierarchies {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hierarchies")
            .field("namespaces", &self.namespaces())
            .finish_non_exhaustive()
    }
}
