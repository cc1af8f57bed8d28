//! Versioned persistence of user overrides and UI preferences.
//!
//! The settings file is plain JSON with sorted keys, UTF-8, and a trailing
//! newline so diffs stay reproducible. Every failure path here degrades to
//! "no settings" or "keep prior state"; nothing in this module aborts a user
//! action in progress.

use crate::catalog::{CommandCatalog, SetShortcutOutcome};
use crate::constants::{SETTINGS_DIR_NAME, SETTINGS_FILE_NAME, SETTINGS_VERSION};
use crate::diagnostics::Diagnostics;
use crate::models::CommandId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk settings document.
///
/// `overrides` maps serialized command ids to shortcut strings. Presence of
/// a key means "the user touched this command"; the empty string means the
/// user explicitly cleared the binding, which is distinct from never-touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSettings {
    /// Format version; only [`SETTINGS_VERSION`] is accepted.
    pub version: u32,
    /// `"<context>/<path>"` -> shortcut string (possibly empty).
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
    /// UI preferences such as `show_only_changed`.
    #[serde(default)]
    pub ui: BTreeMap<String, bool>,
}

/// Owner of on-disk override state.
#[derive(Debug, Clone)]
pub struct OverrideStore {
    settings_path: PathBuf,
    /// User-authored bindings and explicit clears.
    pub overrides: BTreeMap<String, String>,
    /// Persisted UI preferences.
    pub ui_prefs: BTreeMap<String, bool>,
}

impl OverrideStore {
    /// Creates an empty store persisting at the given path.
    #[must_use]
    pub fn new(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            overrides: BTreeMap::new(),
            ui_prefs: BTreeMap::new(),
        }
    }

    /// Creates a store at the platform default location
    /// (`<config>/ShortcutEditor/settings.json`).
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_settings_path()?))
    }

    /// Where this store persists.
    #[must_use]
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads settings from disk into this store.
    ///
    /// Missing file, unreadable file, corrupt JSON, and version mismatch all
    /// leave the store's prior in-memory state untouched; the version
    /// mismatch is surfaced as a warning. Never fails.
    pub fn load(&mut self) {
        let Some(settings) = load_settings_file(&self.settings_path) else {
            return;
        };

        if settings.version != SETTINGS_VERSION {
            warn!(
                "Wrong version of shortcut editor settings, nothing loaded \
                 (version was {}, expected {}), path was {}",
                settings.version,
                SETTINGS_VERSION,
                self.settings_path.display()
            );
            return;
        }

        self.overrides = settings.overrides;
        self.ui_prefs = settings.ui;
    }

    /// Writes `{version, overrides, ui}` to disk.
    ///
    /// Creates the parent directory if absent (an already-exists race is not
    /// an error). I/O failures are logged and swallowed; in-memory state is
    /// the source of truth either way.
    pub fn save(&self) {
        if let Err(err) = self.save_internal() {
            warn!("Error saving shortcut editor settings: {err:#}");
        }
    }

    fn save_internal(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            // create_dir_all tolerates a concurrent "already exists".
            fs::create_dir_all(parent).context(format!(
                "Failed to create settings directory: {}",
                parent.display()
            ))?;
        }

        let settings = PersistedSettings {
            version: SETTINGS_VERSION,
            overrides: self.overrides.clone(),
            ui: self.ui_prefs.clone(),
        };
        // BTreeMap keys serialize sorted, keeping diffs reproducible.
        let mut content =
            serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
        content.push('\n');

        fs::write(&self.settings_path, content).context(format!(
            "Failed to write settings file: {}",
            self.settings_path.display()
        ))?;
        Ok(())
    }

    /// Removes all overrides and persists the now-empty set.
    pub fn clear(&mut self) {
        self.overrides.clear();
        self.save();
    }

    /// Records an override (or explicit clear, for empty text).
    pub fn set_override(&mut self, command: &CommandId, shortcut_text: &str) {
        self.overrides
            .insert(command.as_key(), shortcut_text.to_string());
    }

    /// A persisted boolean UI preference, defaulting to false.
    #[must_use]
    pub fn ui_pref(&self, key: &str) -> bool {
        self.ui_prefs.get(key).copied().unwrap_or(false)
    }

    /// Sets a UI preference.
    pub fn set_ui_pref(&mut self, key: &str, value: bool) {
        self.ui_prefs.insert(key.to_string(), value);
    }

    /// Applies loaded overrides to the live catalog.
    ///
    /// Commands the catalog no longer reports are recorded as orphaned and
    /// kept in the in-memory map (and therefore on disk). Returns the
    /// orphaned ids, deduplicated and sorted.
    pub fn apply_to_catalog(
        &self,
        catalog: &mut dyn CommandCatalog,
        diagnostics: &mut Diagnostics,
    ) -> Vec<CommandId> {
        let mut orphaned = Vec::new();
        for (key, shortcut_text) in &self.overrides {
            let command = CommandId::from_key(key);
            match catalog.set_shortcut(&command.context, &command.path, shortcut_text) {
                SetShortcutOutcome::Applied => {}
                SetShortcutOutcome::NotFound => orphaned.push(command),
            }
        }
        orphaned.sort();
        orphaned.dedup();
        diagnostics.report_orphans(&orphaned);
        orphaned
    }
}

/// Deserializes a settings file, treating every failure as "no settings".
#[must_use]
pub fn load_settings_file(path: &Path) -> Option<PersistedSettings> {
    if !path.is_file() {
        debug!("Settings file {} does not exist", path.display());
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!("Error reading settings file {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(err) => {
            warn!("Error parsing settings file {}: {err}", path.display());
            None
        }
    }
}

/// The platform default settings path.
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to determine config directory")?
        .join(SETTINGS_DIR_NAME);
    Ok(config_dir.join(SETTINGS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use tempfile::TempDir;

    fn temp_store(temp_dir: &TempDir) -> OverrideStore {
        OverrideStore::new(temp_dir.path().join("nested").join("settings.json"))
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        store.set_override(&CommandId::new("Nodes", "Filter/Blur"), "Ctrl+B");
        // Explicit clear is preserved as an empty string, not dropped.
        store.set_override(&CommandId::new("Viewer", "Zoom In"), "");
        store.set_ui_pref("show_only_changed", true);
        store.save();

        let mut reloaded = OverrideStore::new(store.settings_path().to_path_buf());
        reloaded.load();
        assert_eq!(reloaded.overrides, store.overrides);
        assert_eq!(reloaded.ui_prefs, store.ui_prefs);
        assert_eq!(
            reloaded.overrides.get("Viewer/Zoom In").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn test_saved_file_is_sorted_utf8_with_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        store.set_override(&CommandId::new("Zeta", "Z"), "Z");
        store.set_override(&CommandId::new("Alpha", "A"), "A");
        store.save();

        let content = fs::read_to_string(store.settings_path()).unwrap();
        assert!(content.ends_with('\n'));
        let alpha = content.find("Alpha/A").unwrap();
        let zeta = content.find("Zeta/Z").unwrap();
        assert!(alpha < zeta, "keys must serialize sorted");
    }

    #[test]
    fn test_missing_file_is_empty_settings() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        store.load();
        assert!(store.overrides.is_empty());
        assert!(store.ui_prefs.is_empty());
    }

    #[test]
    fn test_corrupt_json_is_empty_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = OverrideStore::new(path);
        store.load();
        assert!(store.overrides.is_empty());
    }

    #[test]
    fn test_version_mismatch_applies_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"version": 2, "overrides": {"Nodes/Blur": "B"}, "ui": {}}"#,
        )
        .unwrap();

        let mut store = OverrideStore::new(path);
        store.load();
        assert!(store.overrides.is_empty());
        assert!(store.ui_prefs.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_prior_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = OverrideStore::new(path);
        store.set_override(&CommandId::new("Nodes", "Blur"), "B");
        store.load();
        // Corrupt file: the in-memory overrides survive.
        assert_eq!(store.overrides.get("Nodes/Blur").map(String::as_str), Some("B"));

        fs::write(
            store.settings_path(),
            r#"{"version": 9, "overrides": {}, "ui": {}}"#,
        )
        .unwrap();
        store.load();
        // Version mismatch behaves the same as a failed load.
        assert!(store.overrides.contains_key("Nodes/Blur"));
    }

    #[test]
    fn test_load_failure_leaves_prior_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        store.set_override(&CommandId::new("Nodes", "Blur"), "B");
        store.save();

        // A failed load elsewhere must not clobber what this store saved.
        let content_before = fs::read_to_string(store.settings_path()).unwrap();
        let mut broken = OverrideStore::new(temp_dir.path().join("missing.json"));
        broken.load();
        let content_after = fs::read_to_string(store.settings_path()).unwrap();
        assert_eq!(content_before, content_after);
    }

    #[test]
    fn test_apply_records_orphans_and_keeps_them() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = MemoryCatalog::new();
        catalog.insert("Nodes", "Filter/Blur", "");

        let mut store = temp_store(&temp_dir);
        store.set_override(&CommandId::new("Nodes", "Filter/Blur"), "Ctrl+B");
        store.set_override(&CommandId::new("Nodes", "Gone/Command"), "G");

        let mut diagnostics = Diagnostics::disabled();
        let orphaned = store.apply_to_catalog(&mut catalog, &mut diagnostics);

        assert_eq!(orphaned, vec![CommandId::new("Nodes", "Gone/Command")]);
        assert_eq!(catalog.commands_in("Nodes")[0].shortcut_text, "Ctrl+B");
        // The orphan stays in the override map.
        assert!(store.overrides.contains_key("Nodes/Gone/Command"));
    }
}
