//! Combinable query predicates over the merged command list.
//!
//! Filtering is a pure function over the cached item list: it never mutates
//! the list and never re-derives data from the host catalog, so recomputing
//! is O(items) and side-effect-free. All active predicates are ANDed.
//!
//! The free-text search ships with a debounce wrapper so quickly typing does
//! not re-filter once per letter.

use crate::conflict::ConflictSet;
use crate::constants::SEARCH_DEBOUNCE;
use crate::models::{ChangeStatus, MenuItem, ShortcutValue};
use crate::timer::DebounceTimer;
use std::time::Instant;

/// Active predicates for one filtering pass.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// Case-insensitive substring match on the command path; empty matches
    /// everything.
    pub text: String,
    /// Exact effective-shortcut match, if set.
    pub key: Option<ShortcutValue>,
    /// Keep only commands whose status is not UNCHANGED.
    pub only_changed: bool,
    /// Keep only commands present in the conflict set.
    pub only_conflicts: bool,
}

impl QueryFilter {
    /// Applies the predicates to an item list, borrowing matching items in
    /// their original order. `status` and `effective` are evaluated lazily
    /// against the same cached view the items came from.
    pub fn apply<'a>(
        &self,
        items: &'a [MenuItem],
        conflicts: &ConflictSet,
        status: impl Fn(&MenuItem) -> ChangeStatus,
        effective: impl Fn(&MenuItem) -> ShortcutValue,
    ) -> Vec<&'a MenuItem> {
        let needle = self.text.to_lowercase();
        items
            .iter()
            .filter(|item| {
                if !needle.is_empty() && !item.command.path.to_lowercase().contains(&needle) {
                    return false;
                }
                if let Some(key) = &self.key {
                    if effective(item) != *key {
                        return false;
                    }
                }
                if self.only_changed && status(item) == ChangeStatus::Unchanged {
                    return false;
                }
                if self.only_conflicts && !conflicts.contains_key(&item.command) {
                    return false;
                }
                true
            })
            .collect()
    }
}

/// Debounced free-text search input: the filter pass runs 200 ms after the
/// last keystroke, not on every one.
#[derive(Debug, Clone)]
pub struct SearchInput {
    text: String,
    timer: DebounceTimer,
}

impl SearchInput {
    /// Creates an empty search box.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            timer: DebounceTimer::new(SEARCH_DEBOUNCE),
        }
    }

    /// Records a text change and restarts the debounce countdown.
    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.timer.restart(now);
    }

    /// The current text, debounced or not.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the settled text once the debounce period has elapsed with
    /// no further edits; `None` while typing is still in flight.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        if self.timer.fire(now) {
            Some(&self.text)
        } else {
            None
        }
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}
