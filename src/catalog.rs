//! Host command catalog interface and an in-memory implementation.
//!
//! The host application is authoritative for which commands exist at any
//! given moment; the core only talks to it through [`CommandCatalog`].
//! [`MemoryCatalog`] backs the CLI and tests with a JSON fixture, and its
//! loader doubles as the adapter that sanitizes host menu names (mnemonic
//! ampersands, divider and hidden-entry markers) before they reach the core.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One command as reported by the host: a `/`-separated path plus the
/// shortcut text currently in force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCommand {
    /// Path below the context, pre-sanitized by the adapter.
    pub path: String,
    /// Current shortcut in the host's string form; empty when unbound.
    pub shortcut_text: String,
}

/// Outcome of asking the host to bind a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetShortcutOutcome {
    /// The command existed and the shortcut was applied.
    Applied,
    /// The command path is not present in this context.
    NotFound,
}

/// The host command catalog consumed by the core.
///
/// Implementations must serialize calls externally; the core assumes a
/// single execution context (see the crate docs).
pub trait CommandCatalog {
    /// Top-level contexts (menus), in host order.
    fn contexts(&self) -> Vec<String>;

    /// All leaf commands in a context. Unknown contexts yield an empty list.
    fn commands_in(&self, context: &str) -> Vec<CatalogCommand>;

    /// Applies a shortcut to a command, if it still exists.
    fn set_shortcut(&mut self, context: &str, path: &str, shortcut_text: &str)
        -> SetShortcutOutcome;
}

/// Serialized fixture format for [`MemoryCatalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    contexts: Vec<ContextFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContextFile {
    /// Context name; empty names get a synthetic stable id on load.
    #[serde(default)]
    name: String,
    commands: Vec<CommandFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommandFile {
    path: String,
    #[serde(default)]
    shortcut: String,
}

/// In-memory catalog used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    /// Context name -> (path -> shortcut text). `BTreeMap` keeps iteration
    /// deterministic for output and tests.
    contexts: BTreeMap<String, BTreeMap<String, String>>,
    order: Vec<String>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command, creating its context on first use.
    pub fn insert(&mut self, context: &str, path: &str, shortcut_text: &str) {
        if !self.contexts.contains_key(context) {
            self.order.push(context.to_string());
        }
        self.contexts
            .entry(context.to_string())
            .or_default()
            .insert(path.to_string(), shortcut_text.to_string());
    }

    /// Removes a command, e.g. to simulate a host dropping it between
    /// sessions.
    pub fn remove(&mut self, context: &str, path: &str) {
        if let Some(commands) = self.contexts.get_mut(context) {
            commands.remove(path);
        }
    }

    /// Loads a catalog from a JSON fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read catalog file: {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&content)
            .context(format!("Failed to parse catalog file: {}", path.display()))?;

        let mut catalog = Self::new();
        for (index, context) in file.contexts.into_iter().enumerate() {
            // A context must always have a stable, non-colliding name; an
            // unnamed menu gets an id from its position, which does not vary
            // across this process run.
            let name = if context.name.is_empty() {
                format!("_unnamed_context_{index}")
            } else {
                sanitize_name(&context.name)
            };
            for command in context.commands {
                let Some(path) = sanitize_path(&command.path) else {
                    continue;
                };
                catalog.insert(&name, &path, &command.shortcut);
            }
        }
        Ok(catalog)
    }
}

impl CommandCatalog for MemoryCatalog {
    fn contexts(&self) -> Vec<String> {
        self.order.clone()
    }

    fn commands_in(&self, context: &str) -> Vec<CatalogCommand> {
        self.contexts
            .get(context)
            .map(|commands| {
                commands
                    .iter()
                    .map(|(path, shortcut_text)| CatalogCommand {
                        path: path.clone(),
                        shortcut_text: shortcut_text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_shortcut(
        &mut self,
        context: &str,
        path: &str,
        shortcut_text: &str,
    ) -> SetShortcutOutcome {
        match self.contexts.get_mut(context).and_then(|c| c.get_mut(path)) {
            Some(slot) => {
                *slot = shortcut_text.to_string();
                SetShortcutOutcome::Applied
            }
            None => SetShortcutOutcome::NotFound,
        }
    }
}

/// Strips mnemonic ampersands from a menu name.
fn sanitize_name(name: &str) -> String {
    name.replace('&', "")
}

/// Sanitizes a command path, skipping dividers (empty names) and hidden
/// entries (`@;`-prefixed, the host's marker for internal bindings).
fn sanitize_path(raw: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in raw.split('/') {
        let segment = sanitize_name(segment);
        if segment.is_empty() || segment.starts_with("@;") {
            return None;
        }
        segments.push(segment);
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
