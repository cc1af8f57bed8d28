//! Clear command: explicit-clear one binding, or reset every override.

use crate::cli::common::SessionArgs;
use crate::models::{CommandId, ShortcutValue};
use anyhow::{bail, Result};
use clap::Args;

/// Clear a command's shortcut, or reset all overrides to defaults
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Command key in `<context>/<path>` form
    #[arg(value_name = "COMMAND", required_unless_present = "all")]
    pub command: Option<String>,

    /// Remove every override, restoring captured defaults
    #[arg(long, conflicts_with = "command")]
    pub all: bool,
}

impl ClearArgs {
    /// Execute the clear command
    pub fn execute(&self) -> Result<()> {
        let mut registry = self.session.open()?;

        if self.all {
            let count = registry.store().overrides.len();
            registry.reset_all();
            println!("Removed {count} overrides");
            return Ok(());
        }

        let Some(key) = &self.command else {
            bail!("Either a command or --all is required");
        };
        let command = CommandId::from_key(key);
        if command.context.is_empty() {
            bail!("Command must be given as <context>/<path>, got {key:?}");
        }
        // An explicit clear is an override entry with the empty value,
        // distinct from never-touched.
        registry.set_override(&command, &ShortcutValue::empty());
        println!("{command} cleared");
        Ok(())
    }
}
