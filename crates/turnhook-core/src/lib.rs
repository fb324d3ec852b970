//! turnhook Core - roster model and change-detection engine
//!
//! This crate provides the pure, I/O-free half of turnhook:
//! - Combatant and Snapshot models mirroring the tracker's wire format
//! - The diff engine producing per-combatant structured changes
//! - A human-readable rendering of change lists
//! - Webhook destination settings
//! - Error and structured logging facilities shared with the dispatcher

pub use turnhook_core_types;

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod settings;

// Re-export commonly used types
pub use diff::{compute_changes, render_change_summary, Change, ChangeProperty, CombatantChanges};
pub use errors::{ExError, ExErrorKind, Result, TurnhookError};
pub use model::{Combatant, Snapshot};
pub use settings::WebhookSettings;
