//! Conflicts command: same-context shortcut collisions.

use crate::cli::common::SessionArgs;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;

/// Show commands whose effective shortcut collides within a context
#[derive(Debug, Clone, Args)]
pub struct ConflictsArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ConflictGroup {
    context: String,
    shortcut: String,
    commands: Vec<String>,
}

impl ConflictsArgs {
    /// Execute the conflicts command
    pub fn execute(&self) -> Result<()> {
        let mut registry = self.session.open()?;
        let conflict_set = registry.conflicts();
        let items = registry.list_all().to_vec();

        // Regroup the pairwise set into (context, shortcut) groups for
        // readable output; BTreeMap keeps the report deterministic.
        let mut groups: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
        for item in &items {
            if !conflict_set.contains_key(&item.command) {
                continue;
            }
            let shortcut = registry.effective_for_item(item).to_canonical_string();
            groups
                .entry((item.command.context.clone(), shortcut))
                .or_default()
                .push(item.command.path.clone());
        }

        let report: Vec<ConflictGroup> = groups
            .into_iter()
            .map(|((context, shortcut), mut commands)| {
                commands.sort();
                ConflictGroup {
                    context,
                    shortcut,
                    commands,
                }
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        if report.is_empty() {
            println!("No conflicts.");
            return Ok(());
        }
        for group in &report {
            println!("{} in {}:", group.shortcut, group.context);
            for command in &group.commands {
                println!("  {command}");
            }
        }
        Ok(())
    }
}
