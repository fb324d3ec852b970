//! Per-encounter dispatcher state.

use turnhook_core::Combatant;
use turnhook_core_types::EncounterId;

/// Mutable state shared by every dispatch of one encounter.
///
/// `step` starts at 0 and advances once per emitted event. A new encounter
/// resets it and issues a fresh id. `last_order` is the baseline the next
/// `update` diffs against.
#[derive(Debug, Clone, Default)]
pub struct Session {
    step: u64,
    encounter_id: EncounterId,
    last_order: Vec<Combatant>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the next event will carry
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn encounter_id(&self) -> &EncounterId {
        &self.encounter_id
    }

    /// Roster as of the last emitted event
    pub fn last_order(&self) -> &[Combatant] {
        &self.last_order
    }

    /// Reset the counter and issue a new encounter id
    pub fn start_new_encounter(&mut self) {
        self.step = 0;
        self.encounter_id = EncounterId::new();
    }

    /// Record that an event carrying the current step was emitted
    pub fn advance(&mut self) {
        self.step = self.step.saturating_add(1);
    }

    pub fn remember(&mut self, order: Vec<Combatant>) {
        self.last_order = order;
    }
}
