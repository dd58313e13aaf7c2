use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rank_hierarchy::{HierarchyConfig, Hierarchies};
use tracing::debug;

use crate::render;

/// Command line arguments of the `diagnose` binary.
#[derive(Debug, Parser)]
#[command(name = "diagnose")]
#[command(bin_name = "diagnose")]
#[command(about = "Print the group hierarchy described by a JSON configuration", long_about = None)]
pub struct DiagnoseCli {
    /// Register under this namespace instead of the one in the file
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Path to a hierarchy configuration document
    pub config: PathBuf,
}

impl DiagnoseCli {
    /// Load the configuration file and render it.
    pub fn run(&self) -> Result<String> {
        let json = std::fs::read_to_string(&self.config)
            .with_context(|| format!("Could not read {}", self.config.display()))?;
        let mut config = HierarchyConfig::from_json(&json)
            .with_context(|| format!("Could not parse {}", self.config.display()))?;

        if let Some(namespace) = &self.namespace {
            config.namespace = Some(namespace.clone());
        }

        diagnose(config)
    }
}

/// Build the hierarchy a configuration describes and render it.
pub fn diagnose(config: HierarchyConfig) -> Result<String> {
    debug!(
        namespace = ?config.namespace,
        groups = config.groups.len(),
        "Diagnosing hierarchy"
    );

    let hierarchies = Hierarchies::new();
    let handle = hierarchies.build_from_config(config)?;
    render(&handle)
}
