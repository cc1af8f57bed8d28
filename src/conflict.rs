//! Per-context shortcut conflict detection.
//!
//! Two commands conflict when they share a non-empty effective shortcut
//! within the same context. Identical shortcuts in different contexts never
//! conflict. The conflict set is built fresh on demand and never persisted.

use crate::models::{CommandId, ShortcutValue};
use std::collections::HashMap;

/// For each conflicting command, the other commands sharing its effective
/// shortcut within the same context (self excluded).
pub type ConflictSet = HashMap<CommandId, Vec<CommandId>>;

/// Groups commands by `(context, effective shortcut)` and reports every
/// group with more than one member. Empty shortcuts are ignored.
#[must_use]
pub fn detect(effective: &[(CommandId, ShortcutValue)]) -> ConflictSet {
    let mut groups: HashMap<(String, String), Vec<CommandId>> = HashMap::new();
    for (command, shortcut) in effective {
        if shortcut.is_empty() {
            continue;
        }
        groups
            .entry((command.context.clone(), shortcut.to_canonical_string()))
            .or_default()
            .push(command.clone());
    }

    let mut conflicts = ConflictSet::new();
    for ((_, _), members) in groups {
        if members.len() < 2 {
            continue;
        }
        for command in &members {
            let others: Vec<CommandId> = members
                .iter()
                .filter(|other| *other != command)
                .cloned()
                .collect();
            conflicts.insert(command.clone(), others);
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(context: &str, path: &str, shortcut: &str) -> (CommandId, ShortcutValue) {
        (CommandId::new(context, path), ShortcutValue::parse(shortcut))
    }

    #[test]
    fn test_same_context_same_shortcut_conflicts() {
        let conflicts = detect(&[
            entry("Nodes", "Filter/Blur", "B"),
            entry("Nodes", "Filter/Glow", "B"),
            entry("Nodes", "Filter/Sharpen", "S"),
        ]);

        let blur = CommandId::new("Nodes", "Filter/Blur");
        let glow = CommandId::new("Nodes", "Filter/Glow");
        assert_eq!(conflicts.get(&blur), Some(&vec![glow.clone()]));
        assert_eq!(conflicts.get(&glow), Some(&vec![blur]));
        assert!(!conflicts.contains_key(&CommandId::new("Nodes", "Filter/Sharpen")));
    }

    #[test]
    fn test_conflicts_never_cross_contexts() {
        let conflicts = detect(&[
            entry("Viewer", "Zoom In", "B"),
            entry("Node Graph", "Fit", "B"),
        ]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_empty_shortcuts_ignored() {
        let conflicts = detect(&[
            entry("Nodes", "Filter/Blur", ""),
            entry("Nodes", "Filter/Glow", ""),
        ]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_conflict_symmetry() {
        let conflicts = detect(&[
            entry("Nodes", "A", "Ctrl+K"),
            entry("Nodes", "B", "Ctrl+K"),
            entry("Nodes", "C", "Ctrl+K"),
        ]);

        for (command, others) in &conflicts {
            assert!(!others.contains(command), "never lists self");
            for other in others {
                assert!(
                    conflicts[other].contains(command),
                    "{other} must list {command} back"
                );
            }
        }
        assert_eq!(conflicts.len(), 3);
        assert_eq!(conflicts[&CommandId::new("Nodes", "A")].len(), 2);
    }

    #[test]
    fn test_equivalent_spellings_collide() {
        // Canonicalization applies before comparison.
        let conflicts = detect(&[
            entry("Nodes", "A", "shift+ctrl+x"),
            entry("Nodes", "B", "Ctrl+Shift+X"),
        ]);
        assert_eq!(conflicts.len(), 2);
    }
}
