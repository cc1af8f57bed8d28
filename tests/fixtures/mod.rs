//! Shared fixtures for CLI end-to-end tests.
#![allow(dead_code)] // Not every test binary uses every helper

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the shortcut-editor binary
pub fn editor_bin() -> &'static str {
    env!("CARGO_BIN_EXE_shortcut-editor")
}

/// A small catalog with one intra-context collision (Blur/Glow on "B" in
/// Nodes) and the same key in another context (Viewer) that must not count.
pub const CATALOG_JSON: &str = r#"{
  "contexts": [
    {
      "name": "Nodes",
      "commands": [
        {"path": "Filter/Blur", "shortcut": "B"},
        {"path": "Filter/Glow", "shortcut": "B"},
        {"path": "Filter/Sharpen", "shortcut": ""}
      ]
    },
    {
      "name": "Viewer",
      "commands": [
        {"path": "Zoom In", "shortcut": "B"}
      ]
    },
    {
      "name": "Node Graph",
      "commands": [
        {"path": "Fit", "shortcut": "F"}
      ]
    }
  ]
}"#;

/// Writes the standard catalog fixture, returning its path.
pub fn write_catalog(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("catalog.json");
    std::fs::write(&path, CATALOG_JSON).expect("write catalog fixture");
    path
}

/// Writes a settings file with the given content, returning its path.
pub fn write_settings(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, content).expect("write settings fixture");
    path
}

/// Runs the binary with the given arguments against a catalog and settings
/// file, panicking if it cannot be spawned.
pub fn run_editor(catalog: &PathBuf, settings: &PathBuf, args: &[&str]) -> Output {
    let mut command = Command::new(editor_bin());
    command.args(args).args([
        "--catalog",
        catalog.to_str().unwrap(),
        "--settings",
        settings.to_str().unwrap(),
    ]);
    command.output().expect("Failed to execute command")
}
