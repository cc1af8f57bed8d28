//! End-to-end tests for `shortcut-editor list`.

mod fixtures;
use fixtures::*;

use tempfile::TempDir;

#[test]
fn test_list_shows_all_commands() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = temp_dir.path().join("settings.json");

    let output = run_editor(&catalog, &settings, &["list"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Filter/Blur"));
    assert!(stdout.contains("Zoom In"));
    assert!(stdout.contains("5 commands shown"));
}

#[test]
fn test_list_json_reports_status_and_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = write_settings(
        &temp_dir,
        r#"{"version": 1, "overrides": {"Node Graph/Fit": "G"}, "ui": {}}"#,
    );

    let output = run_editor(&catalog, &settings, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("Should parse JSON output");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);

    let fit = rows
        .iter()
        .find(|row| row["path"] == "Fit")
        .expect("Fit row present");
    assert_eq!(fit["status"], "REPLACED");
    assert_eq!(fit["shortcut"], "G");

    let blur = rows.iter().find(|row| row["path"] == "Filter/Blur").unwrap();
    assert_eq!(blur["status"], "UNCHANGED");
    assert_eq!(
        blur["conflicts_with"].as_array().unwrap(),
        &vec![serde_json::json!("Nodes/Filter/Glow")]
    );

    // Same key in Viewer does not conflict across contexts.
    let zoom = rows.iter().find(|row| row["path"] == "Zoom In").unwrap();
    assert!(zoom["conflicts_with"].as_array().unwrap().is_empty());
}

#[test]
fn test_list_search_filter() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = temp_dir.path().join("settings.json");

    let output = run_editor(&catalog, &settings, &["list", "--json", "--search", "blur"]);
    let rows: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["path"], "Filter/Blur");
}

#[test]
fn test_list_key_filter_uses_canonical_equality() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = temp_dir.path().join("settings.json");

    // Lowercase spelling matches the canonical "B" bindings.
    let output = run_editor(&catalog, &settings, &["list", "--json", "--key", "b"]);
    let rows: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
}

#[test]
fn test_list_changed_filter() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = write_settings(
        &temp_dir,
        r#"{"version": 1, "overrides": {"Nodes/Filter/Blur": ""}, "ui": {}}"#,
    );

    let output = run_editor(&catalog, &settings, &["list", "--json", "--changed"]);
    let rows: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "CLEARED");
}

#[test]
fn test_list_conflicts_filter() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = temp_dir.path().join("settings.json");

    let output = run_editor(&catalog, &settings, &["list", "--json", "--conflicts"]);
    let rows: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["context"], "Nodes");
    }
}

#[test]
fn test_list_includes_orphans_as_missing() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = write_settings(
        &temp_dir,
        r#"{"version": 1, "overrides": {"Nodes/Gone/Command": "Ctrl+G"}, "ui": {}}"#,
    );

    let output = run_editor(&catalog, &settings, &["list", "--json"]);
    let rows: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let orphan = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["path"] == "Gone/Command")
        .expect("orphan listed");
    assert_eq!(orphan["orphaned"], true);
    assert_eq!(orphan["shortcut"], "Ctrl+G");
}

#[test]
fn test_list_version_mismatch_applies_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = write_settings(
        &temp_dir,
        r#"{"version": 7, "overrides": {"Node Graph/Fit": "G"}, "ui": {}}"#,
    );

    let output = run_editor(&catalog, &settings, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(0), "version mismatch is not fatal");

    let rows: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let fit = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["path"] == "Fit")
        .unwrap();
    // Nothing applied: factory default still in force.
    assert_eq!(fit["shortcut"], "F");
    assert_eq!(fit["status"], "UNCHANGED");
}

#[test]
fn test_list_missing_settings_file_is_fine() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&temp_dir);
    let settings = temp_dir.path().join("never-written.json");

    let output = run_editor(&catalog, &settings, &["list"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_list_missing_catalog_fails() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = temp_dir.path().join("nope.json");
    let settings = temp_dir.path().join("settings.json");

    let output = run_editor(&catalog, &settings, &["list"]);
    assert_ne!(output.status.code(), Some(0));
}
