use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Declarative adjacency description a hierarchy is built from.
///
/// Maps each group name to the ordered list of groups it is senior to (its
/// subordinates). Declaration order is preserved, both for the groups and for
/// each subordinate list, since the resolution order follows it.
///
/// Serialized as a plain JSON object:
///
/// ```json
/// {
///   "superuser": ["spymasters", "politicians"],
///   "spymasters": ["spies", "moles"],
///   "spies": ["informants"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyDescription(IndexMap<String, Vec<String>>);

impl HierarchyDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`HierarchyDescription::insert`].
    pub fn with<I, S>(mut self, group: impl Into<String>, subordinates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(group, subordinates);
        self
    }

    /// Declare `group` as senior to `subordinates`, replacing any previous
    /// declaration for `group`.
    pub fn insert<I, S>(&mut self, group: impl Into<String>, subordinates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            group.into(),
            subordinates.into_iter().map(Into::into).collect(),
        );
    }

    /// Parse a description from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of declared groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no group is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate declared groups and their subordinates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(group, subordinates)| (group.as_str(), subordinates.as_slice()))
    }
}

impl<K, I, S> FromIterator<(K, I)> for HierarchyDescription
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut description = Self::new();
        for (group, subordinates) in iter {
            description.insert(group, subordinates);
        }
        description
    }
}

/// A hierarchy description together with the namespace it is registered
/// under.
///
/// This is the document shape external loaders hand over:
///
/// ```json
/// {
///   "namespace": "agency",
///   "groups": { "superuser": ["spies"], "spies": ["base"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Namespace to register the hierarchy under; the default namespace when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// The groups and their subordinates.
    pub groups: HierarchyDescription,
}

impl HierarchyConfig {
    /// Parse a configuration document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RankHierarchyError;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn it_preserves_declaration_order() -> TestResult {
        let description = HierarchyDescription::from_json(
            r#"{ "superuser": ["spymasters", "politicians"], "citizens": ["base"] }"#,
        )?;

        let groups: Vec<(&str, Vec<&str>)> = description
            .iter()
            .map(|(group, subordinates)| {
                (group, subordinates.iter().map(String::as_str).collect())
            })
            .collect();
        assert_eq!(
            groups,
            vec![
                ("superuser", vec!["spymasters", "politicians"]),
                ("citizens", vec!["base"]),
            ]
        );
        Ok(())
    }

    #[test]
    fn it_collects_from_pairs() {
        let description: HierarchyDescription =
            [("superuser", vec!["spies"]), ("spies", vec!["base"])]
                .into_iter()
                .collect();

        assert_eq!(description.len(), 2);
        assert_eq!(
            description,
            HierarchyDescription::new()
                .with("superuser", ["spies"])
                .with("spies", ["base"])
        );
    }

    #[test]
    fn it_reads_a_namespaced_config() -> TestResult {
        let config = HierarchyConfig::from_json(
            r#"{ "namespace": "agency", "groups": { "superuser": ["spies"] } }"#,
        )?;

        assert_eq!(config.namespace.as_deref(), Some("agency"));
        assert_eq!(config.groups.len(), 1);
        Ok(())
    }

    #[test]
    fn it_defaults_the_config_namespace() -> TestResult {
        let config = HierarchyConfig::from_json(r#"{ "groups": {} }"#)?;

        assert_eq!(config.namespace, None);
        assert!(config.groups.is_empty());
        Ok(())
    }

    #[test]
    fn it_rejects_malformed_json() {
        let result = HierarchyDescription::from_json(r#"{ "superuser": "spies" }"#);

        assert!(matches!(result, Err(RankHierarchyError::Config(_))));
    }
}
