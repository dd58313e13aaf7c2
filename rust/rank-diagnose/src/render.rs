use std::borrow::Cow;
use std::collections::BTreeSet;
use std::io;

use ptree::{PrintConfig, Style, TreeItem};
use rank_hierarchy::{APEX, HierarchyGraph, HierarchyHandle};

/// One line of the rendered hierarchy and everything indented beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyTree {
    label: String,
    children: Vec<HierarchyTree>,
}

impl HierarchyTree {
    /// Lay out the hierarchy behind `handle`.
    ///
    /// The top line names the namespace. Beneath it the apex comes first,
    /// followed by every other root, and finally any group that no root
    /// reaches. Subordinates are listed in resolution order. A group that
    /// leads back to one of its own seniors is marked and not expanded again.
    pub fn new(handle: &HierarchyHandle) -> Self {
        let graph = handle.graph();
        let mut reached: BTreeSet<&str> = BTreeSet::new();
        let mut children = Vec::new();

        let roots = handle.roots();
        let starts = std::iter::once(APEX)
            .chain(roots.iter().map(String::as_str).filter(|root| *root != APEX))
            .chain(graph.names());

        for start in starts {
            if reached.contains(start) {
                continue;
            }
            reached.extend(graph.walk(start));
            children.push(Self::expand(graph, start, &mut Vec::new()));
        }

        Self {
            label: handle.namespace().to_string(),
            children,
        }
    }

    fn expand<'a>(graph: &'a HierarchyGraph, name: &'a str, path: &mut Vec<&'a str>) -> Self {
        if path.contains(&name) {
            return Self {
                label: format!("{name} (cycle)"),
                children: Vec::new(),
            };
        }

        path.push(name);
        let children = graph
            .subordinates(name)
            .iter()
            .map(|subordinate| Self::expand(graph, subordinate, path))
            .collect();
        path.pop();

        Self {
            label: name.to_owned(),
            children,
        }
    }

    /// The text of this line.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lines indented beneath this one.
    pub fn branches(&self) -> &[HierarchyTree] {
        &self.children
    }
}

impl TreeItem for HierarchyTree {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &Style) -> io::Result<()> {
        write!(f, "{}", style.paint(&self.label))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::from(&self.children[..])
    }
}

/// Render the hierarchy behind `handle` as an indented name listing.
pub fn render(handle: &HierarchyHandle) -> anyhow::Result<String> {
    let tree = HierarchyTree::new(handle);
    let mut output = Vec::new();
    ptree::write_tree_with(&tree, &mut output, &PrintConfig::default())?;
    Ok(String::from_utf8(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rank_hierarchy::{FLOOR, Hierarchies, HierarchyDescription};

    fn labels(tree: &HierarchyTree) -> Vec<&str> {
        tree.branches().iter().map(HierarchyTree::label).collect()
    }

    #[test]
    fn it_lays_out_the_apex_first() -> Result<()> {
        let hierarchies = Hierarchies::new();
        let handle = hierarchies.build(
            HierarchyDescription::new()
                .with("auditors", ["citizens"])
                .with(APEX, ["politicians"])
                .with("politicians", ["citizens"]),
            Some("parliament"),
        )?;

        let tree = HierarchyTree::new(&handle);
        assert_eq!(tree.label(), "parliament");
        assert_eq!(labels(&tree), vec![APEX, "auditors"]);

        let apex = &tree.branches()[0];
        assert_eq!(labels(apex), vec!["politicians"]);
        assert_eq!(labels(&apex.branches()[0]), vec!["citizens"]);
        assert_eq!(labels(&apex.branches()[0].branches()[0]), vec![FLOOR]);
        Ok(())
    }

    #[test]
    fn it_marks_cycles_instead_of_expanding_them() -> Result<()> {
        let hierarchies = Hierarchies::new();
        let handle = hierarchies.build(
            HierarchyDescription::new()
                .with("handlers", ["assets"])
                .with("assets", ["handlers"]),
            None,
        )?;

        let tree = HierarchyTree::new(&handle);
        assert_eq!(labels(&tree), vec![APEX, FLOOR, "assets"]);
        assert!(tree.branches()[0].branches().is_empty());

        let assets = &tree.branches()[2];
        assert_eq!(labels(assets), vec!["handlers"]);
        assert_eq!(labels(&assets.branches()[0]), vec!["assets (cycle)"]);
        Ok(())
    }

    #[test]
    fn it_renders_every_group_name() -> Result<()> {
        let hierarchies = Hierarchies::new();
        let handle = hierarchies.build(
            HierarchyDescription::new()
                .with(APEX, ["spymasters"])
                .with("spymasters", ["spies", "moles"]),
            None,
        )?;

        let output = render(&handle)?;
        assert!(output.contains("<default>"));
        for name in [APEX, "spymasters", "spies", "moles", FLOOR] {
            assert!(output.contains(name), "{name} missing from:\n{output}");
        }
        Ok(())
    }
}
