//! Set command: record an override for one command.

use crate::cli::common::SessionArgs;
use crate::models::{CommandId, ShortcutValue};
use anyhow::{bail, Result};
use clap::Args;

/// Bind a shortcut to a command and persist it as an override
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Command key in `<context>/<path>` form
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Shortcut string (e.g. "Ctrl+Shift+B")
    #[arg(value_name = "SHORTCUT")]
    pub shortcut: String,
}

impl SetArgs {
    /// Execute the set command
    pub fn execute(&self) -> Result<()> {
        let command = CommandId::from_key(&self.command);
        if command.context.is_empty() {
            bail!("Command must be given as <context>/<path>, got {:?}", self.command);
        }
        let value = ShortcutValue::parse(&self.shortcut);
        if value.is_empty() {
            bail!("Unrecognized shortcut: {:?}", self.shortcut);
        }

        let mut registry = self.session.open()?;
        // Non-interactive counterpart of the "already assigned to X" prompt:
        // both bindings are kept, the collision is reported.
        let holders = registry.commands_sharing(&value, &command.context, &command);
        registry.set_override(&command, &value);

        println!("{command} = {value}");
        for holder in holders {
            eprintln!(
                "Warning: {value} is already assigned to {holder}; both may not function as expected"
            );
        }
        Ok(())
    }
}
