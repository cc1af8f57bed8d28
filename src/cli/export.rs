//! Export command: the sharing snippet for saved overrides.

use crate::cli::common::SessionArgs;
use crate::constants::APP_NAME;
use crate::export::overrides_as_snippet;
use anyhow::Result;
use clap::Args;

/// Emit a startup-script snippet that re-applies the saved overrides
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> Result<()> {
        let registry = self.session.open()?;
        println!("# {APP_NAME} generated snippet:");
        let snippet = overrides_as_snippet(&registry.store().overrides);
        if !snippet.is_empty() {
            println!("{snippet}");
        }
        println!("# End {APP_NAME} generated snippet");
        Ok(())
    }
}
