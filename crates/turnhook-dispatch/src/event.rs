//! Event taxonomy and the envelope posted to subscribers.
//!
//! Wire shape:
//!
//! ```json
//! { "eventType": "update", "step": 4, "order": [...],
//!   "encounter": { "id": "..." }, "changes": [...] }
//! ```
//!
//! `changes` exists only on `update`; the other event types carry the
//! current order alone.

use serde::{Deserialize, Serialize};
use turnhook_core::{Combatant, CombatantChanges, TurnhookError};
use turnhook_core_types::EncounterId;

/// The state transitions a host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notification {
    /// A fresh encounter was set up; resets the step counter
    #[serde(rename = "new-encounter")]
    NewEncounter,
    /// Combat began
    #[serde(rename = "start-encounter")]
    StartEncounter,
    /// The roster changed; carries the computed diff
    #[serde(rename = "update")]
    Update,
    /// Turn advanced
    #[serde(rename = "next")]
    Next,
    /// Turn moved back
    #[serde(rename = "previous")]
    Previous,
}

impl Notification {
    /// Wire tag used as `eventType`
    pub fn as_str(&self) -> &'static str {
        match self {
            Notification::NewEncounter => "new-encounter",
            Notification::StartEncounter => "start-encounter",
            Notification::Update => "update",
            Notification::Next => "next",
            Notification::Previous => "previous",
        }
    }

    /// Operation name used in structured logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Notification::NewEncounter => "notify_new_encounter",
            Notification::StartEncounter => "notify_encounter_started",
            Notification::Update => "notify_update",
            Notification::Next => "notify_next",
            Notification::Previous => "notify_previous",
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `encounter` object of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRef {
    pub id: EncounterId,
}

/// Fields shared by every event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
    /// Position of this event within the encounter, starting at 0
    pub step: u64,
    /// Roster at dispatch time, in turn order
    pub order: Vec<Combatant>,
    pub encounter: EncounterRef,
}

/// Body of an `update` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBody {
    pub step: u64,
    pub order: Vec<Combatant>,
    pub encounter: EncounterRef,
    /// Per-combatant changes since the previously dispatched roster
    pub changes: Vec<CombatantChanges>,
}

/// One event envelope, tagged by `eventType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum WebhookEvent {
    #[serde(rename = "new-encounter")]
    NewEncounter(EventBody),
    #[serde(rename = "start-encounter")]
    StartEncounter(EventBody),
    #[serde(rename = "update")]
    Update(UpdateBody),
    #[serde(rename = "next")]
    Next(EventBody),
    #[serde(rename = "previous")]
    Previous(EventBody),
}

impl WebhookEvent {
    /// Build the envelope for `kind`.
    ///
    /// `changes` is used only for [`Notification::Update`] and dropped for
    /// every other kind.
    pub fn new(
        kind: Notification,
        step: u64,
        order: Vec<Combatant>,
        encounter_id: EncounterId,
        changes: Vec<CombatantChanges>,
    ) -> Self {
        let encounter = EncounterRef { id: encounter_id };
        if kind == Notification::Update {
            return WebhookEvent::Update(UpdateBody {
                step,
                order,
                encounter,
                changes,
            });
        }

        let body = EventBody {
            step,
            order,
            encounter,
        };
        match kind {
            Notification::NewEncounter => WebhookEvent::NewEncounter(body),
            Notification::StartEncounter => WebhookEvent::StartEncounter(body),
            Notification::Next => WebhookEvent::Next(body),
            Notification::Previous | Notification::Update => WebhookEvent::Previous(body),
        }
    }

    pub fn kind(&self) -> Notification {
        match self {
            WebhookEvent::NewEncounter(_) => Notification::NewEncounter,
            WebhookEvent::StartEncounter(_) => Notification::StartEncounter,
            WebhookEvent::Update(_) => Notification::Update,
            WebhookEvent::Next(_) => Notification::Next,
            WebhookEvent::Previous(_) => Notification::Previous,
        }
    }

    pub fn step(&self) -> u64 {
        match self {
            WebhookEvent::Update(body) => body.step,
            WebhookEvent::NewEncounter(body)
            | WebhookEvent::StartEncounter(body)
            | WebhookEvent::Next(body)
            | WebhookEvent::Previous(body) => body.step,
        }
    }

    pub fn order(&self) -> &[Combatant] {
        match self {
            WebhookEvent::Update(body) => &body.order,
            WebhookEvent::NewEncounter(body)
            | WebhookEvent::StartEncounter(body)
            | WebhookEvent::Next(body)
            | WebhookEvent::Previous(body) => &body.order,
        }
    }

    pub fn encounter_id(&self) -> &EncounterId {
        match self {
            WebhookEvent::Update(body) => &body.encounter.id,
            WebhookEvent::NewEncounter(body)
            | WebhookEvent::StartEncounter(body)
            | WebhookEvent::Next(body)
            | WebhookEvent::Previous(body) => &body.encounter.id,
        }
    }

    /// The diff carried by an `update`; `None` for every other kind
    pub fn changes(&self) -> Option<&[CombatantChanges]> {
        match self {
            WebhookEvent::Update(body) => Some(&body.changes),
            _ => None,
        }
    }

    /// Consume the envelope and keep its roster
    pub fn into_order(self) -> Vec<Combatant> {
        match self {
            WebhookEvent::Update(body) => body.order,
            WebhookEvent::NewEncounter(body)
            | WebhookEvent::StartEncounter(body)
            | WebhookEvent::Next(body)
            | WebhookEvent::Previous(body) => body.order,
        }
    }

    /// Serialize to the JSON request body.
    ///
    /// # Errors
    ///
    /// - `Serialization`: should not occur for well-formed rosters
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TurnhookError> {
        Ok(serde_json::to_vec(self)?)
    }
}
