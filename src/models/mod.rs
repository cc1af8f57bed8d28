//! Data models for commands, shortcuts, and change status.
//!
//! This module contains the core data structures used throughout the
//! application. Models are designed to be independent of any host UI.

pub mod command;
pub mod shortcut;

// Re-export all model types
pub use command::{ChangeStatus, CommandId, MenuItem};
pub use shortcut::{Keystroke, ShortcutValue, MODIFIERS_MASK};
