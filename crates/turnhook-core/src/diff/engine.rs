//! Roster change computation engine.
//!
//! The core entry point is [`compute_changes`], which compares two roster
//! snapshots and produces one [`CombatantChanges`] entry per combatant that
//! was added, removed or modified.

use crate::diff::model::{ArmorClass, Change, ChangeProperty, CombatantChanges, MaxHitPoints};
use crate::model::Combatant;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Serialize a value for a `Change` payload.
///
/// Every input here is plain data with string keys, so serialization cannot
/// fail; `Null` stands in should that ever change.
fn to_json<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Compute a set-delta between two lists.
///
/// Returns `(added, removed)` where added = in b but not a, removed = in a but
/// not b. Each side keeps the order of its source list.
pub fn set_delta(a: &[String], b: &[String]) -> (Vec<String>, Vec<String>) {
    let set_a: BTreeSet<&str> = a.iter().map(|s| s.as_str()).collect();
    let set_b: BTreeSet<&str> = b.iter().map(|s| s.as_str()).collect();
    let added: Vec<String> = b
        .iter()
        .filter(|s| !set_a.contains(s.as_str()))
        .cloned()
        .collect();
    let removed: Vec<String> = a
        .iter()
        .filter(|s| !set_b.contains(s.as_str()))
        .cloned()
        .collect();
    (added, removed)
}

/// Push a change for `property` if the two values differ.
fn scalar_change<T: PartialEq + Serialize>(
    changes: &mut Vec<Change>,
    property: ChangeProperty,
    old: &T,
    new: &T,
) {
    if old != new {
        changes.push(Change::new(property, to_json(old), to_json(new)));
    }
}

/// Compare the tracked fields of one combatant across two snapshots.
///
/// Emission order is fixed: the independent scalar fields, then the joint
/// `ac` and `max` pairs, then `status`. Fields not listed here (name, extra
/// tracker fields) are never compared.
pub fn compare_combatant(old: &Combatant, new: &Combatant) -> Vec<Change> {
    let mut changes = Vec::new();

    scalar_change(&mut changes, ChangeProperty::Active, &old.active, &new.active);
    scalar_change(&mut changes, ChangeProperty::Hp, &old.hp, &new.hp);
    scalar_change(&mut changes, ChangeProperty::Temp, &old.temp, &new.temp);
    scalar_change(&mut changes, ChangeProperty::Enabled, &old.enabled, &new.enabled);
    scalar_change(&mut changes, ChangeProperty::Hidden, &old.hidden, &new.hidden);
    scalar_change(
        &mut changes,
        ChangeProperty::Initiative,
        &old.initiative,
        &new.initiative,
    );
    scalar_change(
        &mut changes,
        ChangeProperty::ManualOrder,
        &old.manual_order,
        &new.manual_order,
    );
    scalar_change(&mut changes, ChangeProperty::Display, &old.display, &new.display);
    scalar_change(&mut changes, ChangeProperty::Friendly, &old.friendly, &new.friendly);

    // Base and current values travel together so subscribers see both sides.
    scalar_change(
        &mut changes,
        ChangeProperty::Ac,
        &ArmorClass::from(old),
        &ArmorClass::from(new),
    );
    scalar_change(
        &mut changes,
        ChangeProperty::Max,
        &MaxHitPoints::from(old),
        &MaxHitPoints::from(new),
    );

    if old.status_set() != new.status_set() {
        changes.push(Change::new(
            ChangeProperty::Status,
            to_json(&old.status),
            to_json(&new.status),
        ));
    }

    changes
}

/// Compute the structured change list between two roster snapshots.
///
/// Combatants are correlated by `id` only. The result lists additions and
/// modifications in `current` order, followed by removals in `previous`
/// order:
///
/// - an id only in `current` yields a single `creature-added` change whose
///   `newValue` is the combatant
/// - an id in both yields an entry only if [`compare_combatant`] found
///   differences
/// - an id only in `previous` yields a single `creature-removed` change whose
///   `newValue` is the old combatant
///
/// If a snapshot violates id uniqueness, the first occurrence in `previous`
/// is the comparison baseline and each removed id is reported once.
pub fn compute_changes(previous: &[Combatant], current: &[Combatant]) -> Vec<CombatantChanges> {
    let mut previous_by_id: HashMap<&str, &Combatant> = HashMap::with_capacity(previous.len());
    for combatant in previous {
        previous_by_id.entry(combatant.id.as_str()).or_insert(combatant);
    }

    let mut visited: HashSet<&str> = HashSet::with_capacity(current.len());
    let mut result: Vec<CombatantChanges> = Vec::new();

    for combatant in current {
        visited.insert(combatant.id.as_str());
        match previous_by_id.get(combatant.id.as_str()) {
            None => result.push(CombatantChanges {
                combatant: combatant.clone(),
                changes: vec![Change::new(
                    ChangeProperty::CreatureAdded,
                    Value::Null,
                    to_json(combatant),
                )],
            }),
            Some(old) => {
                let changes = compare_combatant(old, combatant);
                if !changes.is_empty() {
                    result.push(CombatantChanges {
                        combatant: combatant.clone(),
                        changes,
                    });
                }
            }
        }
    }

    let mut reported: HashSet<&str> = HashSet::new();
    for old in previous {
        let id = old.id.as_str();
        if visited.contains(id) || !reported.insert(id) {
            continue;
        }
        result.push(CombatantChanges {
            combatant: old.clone(),
            changes: vec![Change::new(
                ChangeProperty::CreatureRemoved,
                Value::Null,
                to_json(old),
            )],
        });
    }

    result
}
