use tracing::trace;

use crate::{APEX, Capability, FLOOR, HierarchyGraph, Source};

/// Capability name the floor group can never claim, even if registered.
pub const CAN: &str = "can";

/// Outcome of a successful capability query.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// What was found.
    pub capability: Capability,
    /// Group whose registry defined it. For an undefined capability granted
    /// by the apex override this is the apex itself.
    pub group: String,
    /// Whether it came from the local registry, a plugin bundle, or the apex
    /// override.
    pub source: Source,
}

impl Resolved {
    fn apex() -> Self {
        Self {
            capability: Capability::Permission,
            group: APEX.to_owned(),
            source: Source::Apex,
        }
    }
}

/// Decide whether `group` holds `capability`.
///
/// `lookup` answers for a single node: it returns the definition registered on
/// exactly that group (local entries first, then plugin bundles), or `None`.
///
/// The search visits `group` first, then its subordinates depth-first in
/// declaration order, and stops at the first node that defines the
/// capability. Two overrides apply before it:
///
/// - the apex always succeeds; if nothing defines the capability it resolves
///   to a bare permission with [`Source::Apex`];
/// - the floor only consults its own registry, and never resolves [`CAN`].
pub fn resolve<L>(
    graph: &HierarchyGraph,
    group: &str,
    capability: &str,
    lookup: L,
) -> Option<Resolved>
where
    L: Fn(&str, &str) -> Option<(Capability, Source)>,
{
    let resolved = match group {
        APEX => Some(search(graph, group, capability, &lookup).unwrap_or_else(Resolved::apex)),
        FLOOR if capability == CAN => None,
        FLOOR => lookup(FLOOR, capability).map(|(found, source)| Resolved {
            capability: found,
            group: FLOOR.to_owned(),
            source,
        }),
        _ => search(graph, group, capability, &lookup),
    };

    trace!(
        group = %group,
        capability = %capability,
        found = ?resolved.as_ref().map(|resolved| &resolved.group),
        "Resolved capability"
    );

    resolved
}

fn search<L>(graph: &HierarchyGraph, group: &str, capability: &str, lookup: &L) -> Option<Resolved>
where
    L: Fn(&str, &str) -> Option<(Capability, Source)>,
{
    graph.walk(group).find_map(|node| {
        lookup(node, capability).map(|(found, source)| Resolved {
            capability: found,
            group: node.to_owned(),
            source,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HierarchyDescription;
    use std::collections::HashSet;
    use testresult::TestResult;

    fn agency() -> crate::Result<HierarchyGraph> {
        HierarchyGraph::build(
            &HierarchyDescription::new()
                .with(APEX, ["spymasters", "politicians"])
                .with("spymasters", ["spies", "moles"])
                .with("spies", ["informants"])
                .with("informants", [FLOOR])
                .with("moles", [FLOOR])
                .with("politicians", ["citizens"])
                .with("citizens", [FLOOR]),
        )
    }

    /// Lookup over a fixed set of (group, capability) definitions, all bare
    /// permissions.
    fn defined(
        entries: &[(&str, &str)],
    ) -> impl Fn(&str, &str) -> Option<(Capability, Source)> {
        let entries: HashSet<(String, String)> = entries
            .iter()
            .map(|(group, capability)| ((*group).to_owned(), (*capability).to_owned()))
            .collect();

        move |group: &str, capability: &str| {
            entries
                .contains(&(group.to_owned(), capability.to_owned()))
                .then_some((Capability::Permission, Source::Local))
        }
    }

    #[test]
    fn it_finds_capabilities_on_reachable_subordinates() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[("spies", "encode_text")]);

        let resolved = resolve(&graph, "spymasters", "encode_text", &lookup)
            .ok_or("spymasters should inherit encode_text")?;
        assert_eq!(resolved.group, "spies");
        assert!(resolve(&graph, "politicians", "encode_text", &lookup).is_none());
        Ok(())
    }

    #[test]
    fn it_prefers_the_nearest_definition() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[("spymasters", "encode_text"), ("spies", "encode_text")]);

        let resolved =
            resolve(&graph, "spymasters", "encode_text", &lookup).ok_or("expected a match")?;
        assert_eq!(resolved.group, "spymasters");
        Ok(())
    }

    #[test]
    fn it_searches_subordinates_left_to_right() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[("moles", "dead_drop"), ("informants", "dead_drop")]);

        let resolved =
            resolve(&graph, "spymasters", "dead_drop", &lookup).ok_or("expected a match")?;
        assert_eq!(resolved.group, "informants");
        Ok(())
    }

    #[test]
    fn it_grants_the_apex_everything() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[("citizens", "vote")]);

        let undefined = resolve(&graph, APEX, "launch_missiles", &lookup)
            .ok_or("apex must resolve everything")?;
        assert_eq!(undefined.source, Source::Apex);
        assert!(undefined.capability.is_permission());

        let defined = resolve(&graph, APEX, "vote", &lookup).ok_or("expected a match")?;
        assert_eq!(defined.group, "citizens");
        assert_eq!(defined.source, Source::Local);
        Ok(())
    }

    #[test]
    fn it_restricts_the_floor_to_its_own_registry() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[(FLOOR, "breathe"), (FLOOR, CAN), ("citizens", "vote")]);

        assert!(resolve(&graph, FLOOR, "breathe", &lookup).is_some());
        assert!(resolve(&graph, FLOOR, "vote", &lookup).is_none());
        assert!(resolve(&graph, FLOOR, CAN, &lookup).is_none());
        Ok(())
    }

    #[test]
    fn it_reaches_floor_capabilities_from_every_branch() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[(FLOOR, "breathe")]);

        for group in ["spymasters", "spies", "informants", "moles", "politicians", "citizens"] {
            let resolved =
                resolve(&graph, group, "breathe", &lookup).ok_or("floor is reachable")?;
            assert_eq!(resolved.group, FLOOR);
        }
        Ok(())
    }

    #[test]
    fn it_lets_descendants_of_the_floor_resolve_can() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[(FLOOR, CAN)]);

        assert!(resolve(&graph, "citizens", CAN, &lookup).is_some());
        Ok(())
    }

    #[test]
    fn it_misses_unknown_groups() -> TestResult {
        let graph = agency()?;
        let lookup = defined(&[("spies", "encode_text")]);

        assert!(resolve(&graph, "ghosts", "encode_text", &lookup).is_none());
        Ok(())
    }
}
