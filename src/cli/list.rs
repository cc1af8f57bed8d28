//! List command: the merged per-command view with status and conflicts.

use crate::cli::common::SessionArgs;
use crate::filter::QueryFilter;
use crate::models::{ChangeStatus, ShortcutValue};
use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

/// List commands with their effective shortcuts and change status
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Case-insensitive substring filter on the command path
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep only commands bound to this exact shortcut
    #[arg(long, value_name = "SHORTCUT")]
    pub key: Option<String>,

    /// Keep only commands whose shortcut differs from the default
    #[arg(long)]
    pub changed: bool,

    /// Keep only commands with a same-context conflict
    #[arg(long)]
    pub conflicts: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListRow {
    context: String,
    path: String,
    shortcut: String,
    status: &'static str,
    orphaned: bool,
    conflicts_with: Vec<String>,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        let mut registry = self.session.open()?;

        let key = match &self.key {
            Some(text) => {
                let value = ShortcutValue::parse(text);
                if value.is_empty() {
                    bail!("Unrecognized shortcut: {text:?}");
                }
                Some(value)
            }
            None => None,
        };
        let filter = QueryFilter {
            text: self.search.clone().unwrap_or_default(),
            key,
            only_changed: self.changed,
            only_conflicts: self.conflicts,
        };

        let conflict_set = registry.conflicts();
        let items = registry.list_all().to_vec();
        let visible = filter.apply(
            &items,
            &conflict_set,
            |item| registry.status(&item.command),
            |item| registry.effective_for_item(item),
        );

        let rows: Vec<ListRow> = visible
            .iter()
            .map(|item| ListRow {
                context: item.command.context.clone(),
                path: item.command.path.clone(),
                shortcut: registry.effective_for_item(item).to_canonical_string(),
                status: registry.status(&item.command).label(),
                orphaned: item.orphaned,
                conflicts_with: conflict_set
                    .get(&item.command)
                    .map(|others| others.iter().map(ToString::to_string).collect())
                    .unwrap_or_default(),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        for row in &rows {
            let mut line = format!(
                "{:<18} {:<10} {} (menu: {})",
                row.shortcut, row.status, row.path, row.context
            );
            if row.orphaned {
                line.push_str(" [missing]");
            }
            if !row.conflicts_with.is_empty() {
                line.push_str(&format!(" [conflicts: {}]", row.conflicts_with.join(", ")));
            }
            println!("{line}");
        }
        println!();
        println!("{} commands shown", rows.len());
        Ok(())
    }
}
