//! Roster snapshots.
//!
//! A snapshot is the full ordered roster at one instant. Order is turn order
//! and is preserved verbatim, but the diff engine correlates by id only.

use crate::errors::{Result, TurnhookError};
use crate::model::Combatant;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Ordered roster state at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<Combatant>);

impl Snapshot {
    pub fn new(combatants: Vec<Combatant>) -> Self {
        Self(combatants)
    }

    /// Parse raw JSON bytes into a snapshot.
    ///
    /// The root must be a JSON array of combatant records.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot`: bytes are not valid UTF-8, not valid JSON, the
    ///   root is not an array, or a record does not match the combatant shape
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| TurnhookError::InvalidSnapshot {
            reason: format!("snapshot is not valid UTF-8: {}", e),
        })?;

        let raw: Value = serde_json::from_str(text).map_err(|e| TurnhookError::InvalidSnapshot {
            reason: format!("snapshot is not valid JSON: {}", e),
        })?;

        if !raw.is_array() {
            return Err(TurnhookError::InvalidSnapshot {
                reason: "snapshot JSON root must be an array".to_string(),
            });
        }

        let combatants: Vec<Combatant> =
            serde_json::from_value(raw).map_err(|e| TurnhookError::InvalidSnapshot {
                reason: format!("failed to deserialize combatants: {}", e),
            })?;

        Ok(Self(combatants))
    }

    /// Check the id invariant: every id non-empty and unique.
    ///
    /// # Errors
    ///
    /// - `EmptyCombatantId`: a combatant has an empty id
    /// - `DuplicateCombatantId`: the first id seen twice
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.0.len());
        for (index, combatant) in self.0.iter().enumerate() {
            if combatant.id.is_empty() {
                return Err(TurnhookError::EmptyCombatantId { index });
            }
            if !seen.insert(combatant.id.as_str()) {
                return Err(TurnhookError::DuplicateCombatantId {
                    combatant_id: combatant.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Combatant> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The combatant whose turn it is, if any
    pub fn active(&self) -> Option<&Combatant> {
        self.0.iter().find(|c| c.active)
    }
}

impl From<Vec<Combatant>> for Snapshot {
    fn from(combatants: Vec<Combatant>) -> Self {
        Self(combatants)
    }
}

impl AsRef<[Combatant]> for Snapshot {
    fn as_ref(&self) -> &[Combatant] {
        &self.0
    }
}
