//! Human-readable summary renderer for roster change lists.

use crate::diff::engine::set_delta;
use crate::diff::model::{ArmorClass, Change, ChangeProperty, CombatantChanges, MaxHitPoints};
use serde_json::Value;

/// Render a human-readable Markdown summary of a change list.
///
/// Intended for terminals and review logs. It is informational only; the
/// structured list is what subscribers receive.
pub fn render_change_summary(changes: &[CombatantChanges]) -> String {
    let mut out = String::new();

    out.push_str("## Roster Changes\n\n");

    let added: Vec<&CombatantChanges> = changes.iter().filter(|c| c.is_addition()).collect();
    let removed: Vec<&CombatantChanges> = changes.iter().filter(|c| c.is_removal()).collect();
    let modified: Vec<&CombatantChanges> = changes
        .iter()
        .filter(|c| !c.is_addition() && !c.is_removal())
        .collect();

    out.push_str(&format!(
        "**Added**: {}  \n**Removed**: {}  \n**Modified**: {}\n\n",
        added.len(),
        removed.len(),
        modified.len()
    ));

    if changes.is_empty() {
        out.push_str("_No roster changes detected._\n");
        return out;
    }

    if !added.is_empty() {
        out.push_str("### Added\n\n");
        for entry in &added {
            out.push_str(&format!(
                "- **{}** (`{}`)\n",
                entry.combatant.label(),
                entry.combatant.id
            ));
        }
        out.push('\n');
    }

    if !removed.is_empty() {
        out.push_str("### Removed\n\n");
        for entry in &removed {
            out.push_str(&format!(
                "- **{}** (`{}`)\n",
                entry.combatant.label(),
                entry.combatant.id
            ));
        }
        out.push('\n');
    }

    if !modified.is_empty() {
        out.push_str("### Modified\n\n");
        for entry in &modified {
            out.push_str(&format!(
                "- **{}** (`{}`)\n",
                entry.combatant.label(),
                entry.combatant.id
            ));
            for change in &entry.changes {
                out.push_str(&format!("  - {}\n", render_change(change)));
            }
        }
        out.push('\n');
    }

    out
}

fn render_change(change: &Change) -> String {
    match change.property {
        ChangeProperty::Status => {
            let old = string_list(&change.old_value);
            let new = string_list(&change.new_value);
            let (gained, lost) = set_delta(&old, &new);
            let mut parts: Vec<String> = Vec::new();
            parts.extend(gained.iter().map(|s| format!("+{}", s)));
            parts.extend(lost.iter().map(|s| format!("-{}", s)));
            format!("status: {}", parts.join(", "))
        }
        ChangeProperty::Ac => format!(
            "ac: {} → {}",
            armor_class(&change.old_value),
            armor_class(&change.new_value)
        ),
        ChangeProperty::Max => format!(
            "max: {} → {}",
            max_hit_points(&change.old_value),
            max_hit_points(&change.new_value)
        ),
        property => format!(
            "{}: {} → {}",
            property,
            scalar(&change.old_value),
            scalar(&change.new_value)
        ),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

fn armor_class(value: &Value) -> String {
    match serde_json::from_value::<ArmorClass>(value.clone()) {
        Ok(pair) if pair.ac == pair.current_ac => pair.ac.to_string(),
        Ok(pair) => format!("{} (base {})", pair.current_ac, pair.ac),
        Err(_) => scalar(value),
    }
}

fn max_hit_points(value: &Value) -> String {
    match serde_json::from_value::<MaxHitPoints>(value.clone()) {
        Ok(pair) if pair.max == pair.current_max => pair.max.to_string(),
        Ok(pair) => format!("{} (base {})", pair.current_max, pair.max),
        Err(_) => scalar(value),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "none".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
