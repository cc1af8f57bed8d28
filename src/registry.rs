//! Merged three-layer shortcut view: defaults, overrides, effective values.
//!
//! [`ShortcutRegistry`] is the session object that owns the merged view and
//! enforces construction order: catalog first, then the one-time default
//! snapshot, then loading and applying saved overrides. The snapshot is a
//! constructor-time guarantee rather than an ambient global, so defaults can
//! never be re-baselined after user state has been applied.

use crate::catalog::{CommandCatalog, SetShortcutOutcome};
use crate::conflict::{self, ConflictSet};
use crate::diagnostics::Diagnostics;
use crate::models::{ChangeStatus, CommandId, MenuItem, ShortcutValue};
use crate::store::OverrideStore;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// Immutable mapping of command ids to their factory-default shortcuts.
///
/// Populated exactly once per session, before any overrides touch the live
/// catalog; there is no API to recapture it.
#[derive(Debug, Clone, Default)]
pub struct DefaultSnapshot {
    defaults: HashMap<CommandId, ShortcutValue>,
}

impl DefaultSnapshot {
    /// Records the current shortcut of every command the catalog reports.
    ///
    /// Must run before saved overrides are applied, otherwise the captured
    /// "defaults" are contaminated by user state.
    #[must_use]
    pub fn capture(catalog: &dyn CommandCatalog, contexts: &[String]) -> Self {
        let mut defaults = HashMap::new();
        for context in contexts {
            for command in catalog.commands_in(context) {
                defaults.insert(
                    CommandId::new(context.clone(), command.path),
                    ShortcutValue::parse(&command.shortcut_text),
                );
            }
        }
        Self { defaults }
    }

    /// The default shortcut for a command; empty if the snapshot never saw it.
    #[must_use]
    pub fn get(&self, command: &CommandId) -> ShortcutValue {
        self.defaults.get(command).copied().unwrap_or_default()
    }

    /// Number of captured commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// True when nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

/// Explicit event sink replacing signal/slot wiring, so the core is
/// testable without any rendering surface.
pub trait EditorObserver {
    /// A command's override changed (edit commit, clear, or conflict
    /// resolution).
    fn on_shortcut_changed(&mut self, command: &CommandId, value: &ShortcutValue) {
        let _ = (command, value);
    }

    /// A persisted UI preference changed.
    fn on_preference_changed(&mut self, key: &str, value: bool) {
        let _ = (key, value);
    }
}

/// Session object merging catalog, default snapshot, and override store
/// into per-command effective shortcuts and change status.
pub struct ShortcutRegistry {
    catalog: Box<dyn CommandCatalog>,
    snapshot: DefaultSnapshot,
    store: OverrideStore,
    diagnostics: Diagnostics,
    /// Merged item list, invalidated after any write.
    cache: Option<Vec<MenuItem>>,
    orphan_count: usize,
    observers: Vec<Box<dyn EditorObserver>>,
}

impl ShortcutRegistry {
    /// Opens a session: captures defaults from the live catalog, loads the
    /// settings file, and applies saved overrides to the catalog. Orphans
    /// are reported through the diagnostics channel.
    #[must_use]
    pub fn open(
        mut catalog: Box<dyn CommandCatalog>,
        mut store: OverrideStore,
        mut diagnostics: Diagnostics,
    ) -> Self {
        // Order matters: snapshot before overrides, so captured defaults are
        // true factory defaults.
        let contexts = catalog.contexts();
        let snapshot = DefaultSnapshot::capture(catalog.as_ref(), &contexts);
        store.load();
        store.apply_to_catalog(catalog.as_mut(), &mut diagnostics);

        Self {
            catalog,
            snapshot,
            store,
            diagnostics,
            cache: None,
            orphan_count: 0,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for change events.
    pub fn add_observer(&mut self, observer: Box<dyn EditorObserver>) {
        self.observers.push(observer);
    }

    /// The captured factory defaults.
    #[must_use]
    pub const fn snapshot(&self) -> &DefaultSnapshot {
        &self.snapshot
    }

    /// The underlying override store.
    #[must_use]
    pub const fn store(&self) -> &OverrideStore {
        &self.store
    }

    /// The shortcut actually in force for a command: override if present
    /// (including the explicit-empty marker), else the snapshot default.
    /// Orphaned commands resolve through their override entry.
    #[must_use]
    pub fn effective_shortcut(&self, command: &CommandId) -> ShortcutValue {
        match self.store.overrides.get(&command.as_key()) {
            Some(text) => ShortcutValue::parse(text),
            None => self.snapshot.get(command),
        }
    }

    /// Change-status classification. Commands without an override entry are
    /// always unchanged.
    #[must_use]
    pub fn status(&self, command: &CommandId) -> ChangeStatus {
        match self.store.overrides.get(&command.as_key()) {
            Some(text) => {
                ChangeStatus::classify(&self.snapshot.get(command), &ShortcutValue::parse(text))
            }
            None => ChangeStatus::Unchanged,
        }
    }

    /// The merged item list: live catalog commands plus orphaned
    /// override-only commands. Cached until invalidated by a write.
    pub fn list_all(&mut self) -> &[MenuItem] {
        if self.cache.is_none() {
            let (items, orphan_count) = self.build_items();
            self.cache = Some(items);
            self.orphan_count = orphan_count;
        }
        self.cache.as_deref().unwrap_or_default()
    }

    fn build_items(&mut self) -> (Vec<MenuItem>, usize) {
        let mut items = Vec::new();
        let mut live_keys = HashSet::new();

        for context in self.catalog.contexts() {
            for command in self.catalog.commands_in(&context) {
                let id = CommandId::new(context.clone(), command.path);
                live_keys.insert(id.as_key());
                items.push(MenuItem {
                    command: id,
                    shortcut: ShortcutValue::parse(&command.shortcut_text),
                    orphaned: false,
                });
            }
        }

        let mut orphan_count = 0;
        for (key, text) in &self.store.overrides {
            if live_keys.contains(key) {
                continue;
            }
            let mut command = CommandId::from_key(key);
            if command.context.is_empty() {
                // A context id must never be empty; derive one that is
                // stable for this process run without colliding with real
                // menu names.
                command.context = synthetic_context_id(key);
            }
            items.push(MenuItem {
                command,
                shortcut: ShortcutValue::parse(text),
                orphaned: true,
            });
            orphan_count += 1;
        }

        (items, orphan_count)
    }

    /// Drops the cached item list. Called after any structural change.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Conflict sets over the current merged view, scoped to context.
    /// Also feeds the opt-in summary diagnostic (at most once per session).
    pub fn conflicts(&mut self) -> ConflictSet {
        self.list_all();
        let items = self.cache.as_deref().unwrap_or_default();
        let effective: Vec<(CommandId, ShortcutValue)> = items
            .iter()
            .map(|item| (item.command.clone(), self.effective_for_item(item)))
            .collect();
        let conflicts = conflict::detect(&effective);
        self.diagnostics
            .report_summary(conflicts.len(), self.orphan_count);
        conflicts
    }

    /// Effective shortcut for a merged item. For orphaned items the
    /// override entry is authoritative; the snapshot never saw them.
    #[must_use]
    pub fn effective_for_item(&self, item: &MenuItem) -> ShortcutValue {
        if item.orphaned {
            return item.shortcut;
        }
        self.effective_shortcut(&item.command)
    }

    /// Live commands sharing an effective shortcut within one context,
    /// excluding `exclude`. Backs the "already assigned to X" edit flow;
    /// orphaned commands are skipped since they have no active binding.
    pub fn commands_sharing(
        &mut self,
        shortcut: &ShortcutValue,
        context: &str,
        exclude: &CommandId,
    ) -> Vec<CommandId> {
        if shortcut.is_empty() {
            return Vec::new();
        }
        self.list_all();
        let items = self.cache.as_deref().unwrap_or_default();
        items
            .iter()
            .filter(|item| {
                !item.orphaned
                    && item.command.context == context
                    && item.command != *exclude
                    && self.effective_for_item(item) == *shortcut
            })
            .map(|item| item.command.clone())
            .collect()
    }

    /// Commits an edited shortcut: applies it to the live catalog (orphans
    /// are skipped, the override is still recorded), persists the override,
    /// invalidates the cache, and notifies observers.
    pub fn set_override(&mut self, command: &CommandId, value: &ShortcutValue) {
        let text = value.to_canonical_string();
        // NotFound here means the command vanished since the last listing;
        // the override is preserved on disk either way.
        let _ = self
            .catalog
            .set_shortcut(&command.context, &command.path, &text);
        self.store.set_override(command, &text);
        self.store.save();
        self.invalidate();
        for observer in &mut self.observers {
            observer.on_shortcut_changed(command, value);
        }
    }

    /// Removes every override and restores catalog commands to their
    /// captured defaults.
    pub fn reset_all(&mut self) {
        let keys: Vec<String> = self.store.overrides.keys().cloned().collect();
        for key in keys {
            let command = CommandId::from_key(&key);
            let default = self.snapshot.get(&command);
            if let SetShortcutOutcome::Applied = self.catalog.set_shortcut(
                &command.context,
                &command.path,
                &default.to_canonical_string(),
            ) {
                for observer in &mut self.observers {
                    observer.on_shortcut_changed(&command, &default);
                }
            }
        }
        self.store.clear();
        self.invalidate();
    }

    /// A persisted UI preference.
    #[must_use]
    pub fn ui_pref(&self, key: &str) -> bool {
        self.store.ui_pref(key)
    }

    /// Persists a UI preference and notifies observers.
    pub fn set_ui_pref(&mut self, key: &str, value: bool) {
        self.store.set_ui_pref(key, value);
        self.store.save();
        for observer in &mut self.observers {
            observer.on_preference_changed(key, value);
        }
    }
}

/// Stable-within-this-run context id for an orphan whose saved key had no
/// context part.
fn synthetic_context_id(key: &str) -> String {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    format!("_unnamed_orphan_{:x}", hasher.finish())
}
