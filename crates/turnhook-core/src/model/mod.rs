pub mod combatant;
pub mod snapshot;

pub use combatant::Combatant;
pub use snapshot::Snapshot;
