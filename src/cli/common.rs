//! Shared session wiring for CLI commands.

use crate::catalog::MemoryCatalog;
use crate::diagnostics::Diagnostics;
use crate::registry::ShortcutRegistry;
use crate::store::{default_settings_path, OverrideStore};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments every subcommand needs to open an editing session.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Path to the command catalog JSON file
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Path to the settings file (defaults to the platform config location)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

impl SessionArgs {
    /// Opens a session in the mandated order: catalog, default snapshot,
    /// settings load, override application.
    pub fn open(&self) -> Result<ShortcutRegistry> {
        let catalog = MemoryCatalog::load(&self.catalog)?;
        let store = match &self.settings {
            Some(path) => OverrideStore::new(path.clone()),
            None => OverrideStore::new(default_settings_path()?),
        };
        Ok(ShortcutRegistry::open(
            Box::new(catalog),
            store,
            Diagnostics::from_env(),
        ))
    }
}
