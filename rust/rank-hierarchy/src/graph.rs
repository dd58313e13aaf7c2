use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::{HierarchyDescription, RankHierarchyError, Result};

/// Name of the apex group: capable of everything.
pub const APEX: &str = "superuser";

/// Name of the floor group: capable only of what is registered on it.
pub const FLOOR: &str = "base";

/// A node of the hierarchy graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    name: String,
    subordinates: Vec<String>,
}

impl GroupNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subordinates: Vec::new(),
        }
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Groups this one is senior to, in declaration order.
    pub fn subordinates(&self) -> &[String] {
        &self.subordinates
    }

    fn push(&mut self, subordinate: &str) {
        if !self.subordinates.iter().any(|name| name == subordinate) {
            self.subordinates.push(subordinate.to_owned());
        }
    }
}

/// The immutable set of groups and their "senior to" edges.
///
/// Always contains the [`APEX`] and [`FLOOR`] groups. Every group other than
/// the sentinels that declares no subordinates is wired to the floor, so the
/// floor terminates every branch. The apex keeps exactly the subordinates
/// declared for it, and the floor has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyGraph {
    groups: BTreeMap<String, GroupNode>,
}

impl HierarchyGraph {
    /// A graph holding only the apex and the floor.
    pub fn sentinels() -> Self {
        let mut graph = Self::unwired();
        graph.wire_floor();
        graph
    }

    fn unwired() -> Self {
        let mut graph = Self {
            groups: BTreeMap::new(),
        };
        graph.node_mut(APEX);
        graph.node_mut(FLOOR);
        graph
    }

    /// Compile a description into a graph.
    pub fn build(description: &HierarchyDescription) -> Result<Self> {
        if description.is_empty() {
            return Err(RankHierarchyError::EmptyDescription);
        }

        let mut graph = Self::unwired();

        for (group, subordinates) in description.iter() {
            graph.node_mut(group);
            for subordinate in subordinates {
                graph.node_mut(subordinate);
                if group == FLOOR {
                    warn!(
                        subordinate = %subordinate,
                        "Ignoring subordinate declared on the floor group"
                    );
                    continue;
                }
                graph.node_mut(group).push(subordinate);
            }
        }

        graph.wire_floor();

        Ok(graph)
    }

    fn node_mut(&mut self, name: &str) -> &mut GroupNode {
        self.groups
            .entry(name.to_owned())
            .or_insert_with(|| GroupNode::new(name))
    }

    fn wire_floor(&mut self) {
        for node in self.groups.values_mut() {
            if node.name != FLOOR && node.name != APEX && node.subordinates.is_empty() {
                node.subordinates.push(FLOOR.to_owned());
            }
        }
    }

    /// Whether `name` is a group of this graph.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Look up a node.
    pub fn node(&self, name: &str) -> Option<&GroupNode> {
        self.groups.get(name)
    }

    /// Subordinates of `name`, or an empty slice for unknown groups.
    pub fn subordinates(&self, name: &str) -> &[String] {
        self.groups
            .get(name)
            .map(GroupNode::subordinates)
            .unwrap_or_default()
    }

    /// All group names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of groups, sentinels included.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false: the sentinels are present in every graph.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups no other group lists as a subordinate, sorted. The apex is
    /// always among them.
    pub fn roots(&self) -> Vec<&str> {
        let subordinates: BTreeSet<&str> = self
            .groups
            .values()
            .flat_map(|node| node.subordinates.iter().map(String::as_str))
            .collect();

        self.names()
            .filter(|name| !subordinates.contains(name))
            .collect()
    }

    /// Groups reachable from `start` by following subordinate edges, in
    /// depth-first, left-to-right order, `start` first. Each group appears
    /// once.
    pub fn walk<'a>(&'a self, start: &'a str) -> Walk<'a> {
        Walk {
            graph: self,
            stack: if self.contains(start) {
                vec![start]
            } else {
                Vec::new()
            },
            visited: BTreeSet::new(),
        }
    }
}

/// Depth-first traversal produced by [`HierarchyGraph::walk`].
pub struct Walk<'a> {
    graph: &'a HierarchyGraph,
    stack: Vec<&'a str>,
    visited: BTreeSet<&'a str>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(name) = self.stack.pop() {
            if !self.visited.insert(name) {
                continue;
            }

            self.stack.extend(
                self.graph
                    .subordinates(name)
                    .iter()
                    .rev()
                    .map(String::as_str),
            );

            return Some(name);
        }

        None
    }
}
