//! Change list output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! The JSON shape is the one webhook subscribers receive inside `update`
//! events: `{ "combatant": {...}, "changes": [{ "property", "oldValue", "newValue" }] }`.

use crate::model::Combatant;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The property group a [`Change`] refers to.
///
/// `CreatureAdded` and `CreatureRemoved` are synthetic: they describe the
/// whole combatant rather than one of its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeProperty {
    #[serde(rename = "creature-added")]
    CreatureAdded,
    #[serde(rename = "creature-removed")]
    CreatureRemoved,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "hp")]
    Hp,
    #[serde(rename = "temp")]
    Temp,
    #[serde(rename = "enabled")]
    Enabled,
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "initiative")]
    Initiative,
    #[serde(rename = "manualOrder")]
    ManualOrder,
    #[serde(rename = "display")]
    Display,
    #[serde(rename = "friendly")]
    Friendly,
    /// `ac` and `current_ac`, compared jointly
    #[serde(rename = "ac")]
    Ac,
    /// `max` and `current_max`, compared jointly
    #[serde(rename = "max")]
    Max,
    /// Status-effect set
    #[serde(rename = "status")]
    Status,
}

impl ChangeProperty {
    /// The wire tag for this property
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeProperty::CreatureAdded => "creature-added",
            ChangeProperty::CreatureRemoved => "creature-removed",
            ChangeProperty::Active => "active",
            ChangeProperty::Hp => "hp",
            ChangeProperty::Temp => "temp",
            ChangeProperty::Enabled => "enabled",
            ChangeProperty::Hidden => "hidden",
            ChangeProperty::Initiative => "initiative",
            ChangeProperty::ManualOrder => "manualOrder",
            ChangeProperty::Display => "display",
            ChangeProperty::Friendly => "friendly",
            ChangeProperty::Ac => "ac",
            ChangeProperty::Max => "max",
            ChangeProperty::Status => "status",
        }
    }
}

impl std::fmt::Display for ChangeProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic difference for one property group on one combatant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub property: ChangeProperty,
    /// Value in the previous snapshot (`null` for synthetic add/remove)
    pub old_value: Value,
    /// Value in the current snapshot; the whole combatant for add/remove
    pub new_value: Value,
}

impl Change {
    pub fn new(property: ChangeProperty, old_value: Value, new_value: Value) -> Self {
        Self {
            property,
            old_value,
            new_value,
        }
    }
}

/// Old/new value of the joint `ac` change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArmorClass {
    pub ac: i64,
    pub current_ac: i64,
}

/// Old/new value of the joint `max` change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaxHitPoints {
    pub max: i64,
    pub current_max: i64,
}

impl From<&Combatant> for ArmorClass {
    fn from(c: &Combatant) -> Self {
        Self {
            ac: c.ac,
            current_ac: c.current_ac,
        }
    }
}

impl From<&Combatant> for MaxHitPoints {
    fn from(c: &Combatant) -> Self {
        Self {
            max: c.max,
            current_max: c.current_max,
        }
    }
}

/// All changes detected for a single combatant.
///
/// `combatant` is the record from the current snapshot, or from the previous
/// snapshot when the combatant was removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombatantChanges {
    pub combatant: Combatant,
    pub changes: Vec<Change>,
}

impl CombatantChanges {
    /// True if this entry records a combatant joining the roster
    pub fn is_addition(&self) -> bool {
        self.has(ChangeProperty::CreatureAdded)
    }

    /// True if this entry records a combatant leaving the roster
    pub fn is_removal(&self) -> bool {
        self.has(ChangeProperty::CreatureRemoved)
    }

    /// Whether any change refers to `property`
    pub fn has(&self, property: ChangeProperty) -> bool {
        self.changes.iter().any(|c| c.property == property)
    }

    /// Property tags in emission order
    pub fn properties(&self) -> Vec<ChangeProperty> {
        self.changes.iter().map(|c| c.property).collect()
    }
}
