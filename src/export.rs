//! Snippet export for sharing overrides.
//!
//! Generates a startup-script fragment that re-applies every override
//! through the host's scripting surface: look up each overridden path and
//! set its shortcut if the path still exists, skipping silently otherwise.
//! Useful for handing a colleague your bindings without this tool installed.

use std::collections::BTreeMap;

/// Renders the override map as a script fragment, grouped per context.
///
/// Contexts and paths come out in sorted order so repeated exports of the
/// same overrides are byte-identical.
#[must_use]
pub fn overrides_as_snippet(overrides: &BTreeMap<String, String>) -> String {
    let mut menus: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
    for (key, shortcut) in overrides {
        let (context, path) = key.split_once('/').unwrap_or(("", key.as_str()));
        menus.entry(context).or_default().push((path, shortcut));
    }

    let mut lines = Vec::new();
    for (context, entries) in menus {
        lines.push(format!("cur_menu = host.menu({context:?})"));
        for (path, shortcut) in entries {
            lines.push(format!("item = cur_menu.find_item({path:?})"));
            lines.push("if item is not None:".to_string());
            lines.push(format!("    item.set_shortcut({shortcut:?})"));
            lines.push(String::new());
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("Nodes/Filter/Blur".to_string(), "Ctrl+B".to_string());
        map.insert("Nodes/Filter/Sharpen".to_string(), String::new());
        map.insert("Viewer/Zoom In".to_string(), "+".to_string());
        map
    }

    #[test]
    fn test_snippet_groups_by_context() {
        let snippet = overrides_as_snippet(&overrides());
        let nodes = snippet.find("cur_menu = host.menu(\"Nodes\")").unwrap();
        let viewer = snippet.find("cur_menu = host.menu(\"Viewer\")").unwrap();
        assert!(nodes < viewer, "contexts in sorted order");
        // One menu lookup per context, not per command.
        assert_eq!(snippet.matches("host.menu(\"Nodes\")").count(), 1);
    }

    #[test]
    fn test_snippet_guards_missing_paths() {
        let snippet = overrides_as_snippet(&overrides());
        assert!(snippet.contains("item = cur_menu.find_item(\"Filter/Blur\")"));
        assert!(snippet.contains("if item is not None:"));
        assert!(snippet.contains("    item.set_shortcut(\"Ctrl+B\")"));
    }

    #[test]
    fn test_snippet_includes_explicit_clears() {
        // An explicit clear exports as setting the empty shortcut.
        let snippet = overrides_as_snippet(&overrides());
        assert!(snippet.contains("item.set_shortcut(\"\")"));
    }

    #[test]
    fn test_snippet_is_deterministic() {
        assert_eq!(
            overrides_as_snippet(&overrides()),
            overrides_as_snippet(&overrides())
        );
    }

    #[test]
    fn test_empty_overrides_empty_snippet() {
        assert_eq!(overrides_as_snippet(&BTreeMap::new()), "");
    }
}
