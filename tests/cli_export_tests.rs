//! End-to-end tests for `shortcut-editor export`.

mod fixtures;
use fixtures::*;

use tempfile::TempDir;

#[test]
fn test_export_wraps_snippet_in_markers() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = write_settings(
        &temp_dir,
        r#"{"version": 1, "overrides": {"Nodes/Filter/Blur": "Ctrl+B"}, "ui": {}}"#,
    );

    let output = run_editor(&catalog, &settings, &["export"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Shortcut Editor generated snippet:"));
    assert!(stdout.trim_end().ends_with("# End Shortcut Editor generated snippet"));
    assert!(stdout.contains("cur_menu = host.menu(\"Nodes\")"));
    assert!(stdout.contains("item = cur_menu.find_item(\"Filter/Blur\")"));
    assert!(stdout.contains("if item is not None:"));
    assert!(stdout.contains("    item.set_shortcut(\"Ctrl+B\")"));
}

#[test]
fn test_export_no_overrides_emits_only_markers() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = temp_dir.path().join("settings.json");

    let output = run_editor(&catalog, &settings, &["export"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "# Shortcut Editor generated snippet:\n# End Shortcut Editor generated snippet\n"
    );
}

#[test]
fn test_export_includes_orphaned_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    // The snippet guards each path, so overrides the catalog no longer
    // knows about still export and apply where they do exist.
    let settings = write_settings(
        &temp_dir,
        r#"{"version": 1, "overrides": {"Nodes/Gone/Command": "Ctrl+G"}, "ui": {}}"#,
    );

    let output = run_editor(&catalog, &settings, &["export"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("item = cur_menu.find_item(\"Gone/Command\")"));
}
