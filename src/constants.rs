//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, settings locations, and timer durations.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Shortcut Editor";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "shortcut-editor";

/// Settings directory name under the platform config directory.
pub const SETTINGS_DIR_NAME: &str = "ShortcutEditor";

/// Settings file name inside the settings directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// The only settings file version this build reads or writes.
pub const SETTINGS_VERSION: u32 = 1;

/// Delay before a recorded keystroke is committed once all modifiers are released.
pub const IDLE_COMMIT_TIMEOUT: Duration = Duration::from_millis(600);

/// Delay between the last search keystroke and re-filtering the command list.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Environment variable enabling per-orphan diagnostic lines.
pub const ENV_DEBUG_ORPHANS: &str = "SHORTCUT_EDITOR_DEBUG";

/// Environment variable enabling the one-line conflict/orphan summary.
pub const ENV_DEBUG_STATS: &str = "SHORTCUT_EDITOR_DEBUG_STATS";
