//! Command identity, menu items, and change-status classification.

use crate::models::ShortcutValue;
use std::fmt;

/// Identity of an addressable command: a top-level context (menu) plus a
/// `/`-separated path inside it.
///
/// Serialized as `"<context>/<path>"`. No two distinct commands share a
/// `CommandId` within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId {
    /// Top-level grouping within which conflicts are evaluated.
    pub context: String,
    /// Hierarchical path below the context (e.g. `"3D/Axis"`).
    pub path: String,
}

impl CommandId {
    /// Creates a command id from its parts.
    pub fn new(context: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            path: path.into(),
        }
    }

    /// Splits a serialized `"<context>/<path>"` key at the first separator.
    ///
    /// A key with no separator yields an empty context, matching how the
    /// settings file has always been partitioned.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.split_once('/') {
            Some((context, path)) => Self::new(context, path),
            None => Self::new("", key),
        }
    }

    /// The serialized form used as a settings-file key.
    #[must_use]
    pub fn as_key(&self) -> String {
        format!("{}/{}", self.context, self.path)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.context, self.path)
    }
}

/// How a command's effective shortcut relates to its factory default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// No override entry, or the override matches the default.
    Unchanged,
    /// Default was empty; the user assigned a shortcut.
    Added,
    /// Default had a shortcut; the user explicitly cleared it.
    Cleared,
    /// Default and override are both non-empty and differ.
    Replaced,
}

impl ChangeStatus {
    /// Display label for status badges and CLI output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unchanged => "UNCHANGED",
            Self::Added => "ADDED",
            Self::Cleared => "CLEARED",
            Self::Replaced => "REPLACED",
        }
    }

    /// Classifies a (default, override) pair. Call only when an override
    /// entry exists; commands the user never touched are always unchanged.
    #[must_use]
    pub fn classify(default: &ShortcutValue, override_value: &ShortcutValue) -> Self {
        match (default.is_empty(), override_value.is_empty()) {
            (true, false) => Self::Added,
            (false, true) => Self::Cleared,
            (true, true) => Self::Unchanged,
            (false, false) => {
                if default == override_value {
                    Self::Unchanged
                } else {
                    Self::Replaced
                }
            }
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the merged command view, derived each time the catalog is
/// queried. Orphaned items exist only in saved overrides; the host catalog
/// no longer reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// The command this row describes.
    pub command: CommandId,
    /// The shortcut currently reported by the host catalog, or the saved
    /// override value for orphaned items.
    pub shortcut: ShortcutValue,
    /// True when the command exists only in saved overrides.
    pub orphaned: bool,
}
