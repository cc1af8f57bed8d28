//! Opt-in, at-most-once-per-session diagnostics.
//!
//! Two independent emissions: one line per orphaned command (deduplicated),
//! and one summary line with conflict and orphan counts. Both are off by
//! default and enabled through environment variables, so a quiet session
//! stays quiet. Nothing here blocks or aborts a user action.

use crate::constants::{ENV_DEBUG_ORPHANS, ENV_DEBUG_STATS};
use crate::models::CommandId;
use std::env;
use tracing::{info, warn};

/// Session-scoped diagnostic channel with one-shot gating.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    orphans_enabled: bool,
    stats_enabled: bool,
    orphans_reported: bool,
    stats_reported: bool,
}

impl Diagnostics {
    /// Reads the opt-in flags from the environment
    /// (`SHORTCUT_EDITOR_DEBUG`, `SHORTCUT_EDITOR_DEBUG_STATS`).
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            orphans_enabled: env_flag(ENV_DEBUG_ORPHANS),
            stats_enabled: env_flag(ENV_DEBUG_STATS),
            orphans_reported: false,
            stats_reported: false,
        }
    }

    /// A channel with both emissions disabled (the default for tests).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            orphans_enabled: false,
            stats_enabled: false,
            orphans_reported: false,
            stats_reported: false,
        }
    }

    /// A channel with both emissions enabled.
    #[must_use]
    pub const fn enabled() -> Self {
        Self {
            orphans_enabled: true,
            stats_enabled: true,
            orphans_reported: false,
            stats_reported: false,
        }
    }

    /// Emits one line per orphaned command. Subsequent calls in the same
    /// session are silent; callers pass an already-deduplicated list.
    pub fn report_orphans(&mut self, orphaned: &[CommandId]) {
        if !self.orphans_enabled || self.orphans_reported || orphaned.is_empty() {
            return;
        }
        self.orphans_reported = true;
        for command in orphaned {
            warn!(
                "Command {:?} (context: {:?}) does not exist, skipping shortcut",
                command.path, command.context
            );
        }
    }

    /// Emits the one-line conflict/orphan summary, at most once per session.
    pub fn report_summary(&mut self, conflict_count: usize, orphan_count: usize) {
        if !self.stats_enabled || self.stats_reported {
            return;
        }
        self.stats_reported = true;
        info!(
            "{conflict_count} conflicting commands across all contexts, \
             {orphan_count} orphaned shortcuts in saved overrides"
        );
    }

    /// True once the orphan lines have been emitted this session.
    #[must_use]
    pub const fn orphans_reported(&self) -> bool {
        self.orphans_reported
    }

    /// True once the summary line has been emitted this session.
    #[must_use]
    pub const fn stats_reported(&self) -> bool {
        self.stats_reported
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
