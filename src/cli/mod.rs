//! CLI command handlers for the shortcut editor.
//!
//! This module provides headless, scriptable access to the core: listing the
//! merged command view, inspecting conflicts, recording overrides, and
//! exporting the sharing snippet.

pub mod clear;
pub mod common;
pub mod conflicts;
pub mod export;
pub mod list;
pub mod set;

// Re-export types used by main.rs and tests
pub use clear::ClearArgs;
pub use common::SessionArgs;
pub use conflicts::ConflictsArgs;
pub use export::ExportArgs;
pub use list::ListArgs;
pub use set::SetArgs;
