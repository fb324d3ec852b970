//! Roster diff engine.
//!
//! Compares two roster snapshots and produces a per-combatant list of
//! structured changes suitable for an `update` webhook payload.
//!
//! ## Entry point
//!
//! ```
//! use turnhook_core::diff::compute_changes;
//! use turnhook_core::Combatant;
//!
//! let before = vec![Combatant::new("x", "Goblin").with_hp(10, 10)];
//! let mut after = before.clone();
//! after[0].hp = 7;
//!
//! let changes = compute_changes(&before, &after);
//! assert_eq!(changes.len(), 1);
//! println!("{}", turnhook_core::diff::render_change_summary(&changes));
//! ```
//!
//! ## Guarantees
//!
//! - **Correlation by id**: roster order never produces a change.
//! - **No empty entries**: an unchanged combatant contributes nothing.
//! - **Joint pairs**: `ac`/`current_ac` and `max`/`current_max` each yield at
//!   most one change.
//! - **Set semantics for status**: reordering status effects is not a change.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compare_combatant, compute_changes};
pub use human_summary::render_change_summary;
pub use model::{ArmorClass, Change, ChangeProperty, CombatantChanges, MaxHitPoints};
