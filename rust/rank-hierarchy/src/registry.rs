use std::collections::HashMap;

use crate::{Capability, Plugin};

/// Where a resolved capability was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Registered directly on the group.
    Local,
    /// A member of the named plugin bundle installed on the group.
    Plugin(String),
    /// Not defined anywhere; granted by the apex override.
    Apex,
}

/// The capabilities attached to a single group.
///
/// Local entries shadow plugin bundles; bundles are consulted in the order
/// they were installed. Nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    local: HashMap<String, Capability>,
    plugins: Vec<Plugin>,
}

impl CapabilityRegistry {
    /// Register `capability` under `name`, replacing a previous local
    /// definition.
    pub fn define(&mut self, name: impl Into<String>, capability: Capability) {
        self.local.insert(name.into(), capability);
    }

    /// Install a plugin bundle. A bundle already installed under the same
    /// name is replaced in place, keeping its priority.
    pub fn install(&mut self, plugin: Plugin) {
        match self
            .plugins
            .iter_mut()
            .find(|installed| installed.name() == plugin.name())
        {
            Some(installed) => *installed = plugin,
            None => self.plugins.push(plugin),
        }
    }

    /// Find `name` on this group alone.
    pub fn lookup(&self, name: &str) -> Option<(Capability, Source)> {
        if let Some(capability) = self.local.get(name) {
            return Some((capability.clone(), Source::Local));
        }

        self.plugins.iter().find_map(|plugin| {
            plugin.get(name).map(|behavior| {
                (
                    Capability::Ability(behavior.clone()),
                    Source::Plugin(plugin.name().to_owned()),
                )
            })
        })
    }

    /// Whether `name` is defined on this group, locally or by a bundle.
    pub fn defines(&self, name: &str) -> bool {
        self.local.contains_key(name) || self.plugins.iter().any(|plugin| plugin.get(name).is_some())
    }

    /// Every capability name defined on this group. May repeat a name that
    /// is both local and in a bundle.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.local
            .keys()
            .map(String::as_str)
            .chain(self.plugins.iter().flat_map(|plugin| plugin.capabilities()))
    }

    /// Names of the installed bundles in priority order.
    pub fn plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(Plugin::name)
    }
}
