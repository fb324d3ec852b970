//! turnhook Dispatch - webhook event emission
//!
//! Owns the per-encounter session state, pulls roster snapshots from the
//! tracker, runs the diff engine and hands event envelopes to a sink. The
//! HTTP sink posts each envelope as JSON on a detached task; nothing here
//! ever reports a failure to the caller.

pub mod dispatcher;
pub mod event;
pub mod session;
pub mod sink;
pub mod tracker;

pub use dispatcher::Dispatcher;
pub use event::{EncounterRef, EventBody, Notification, UpdateBody, WebhookEvent};
pub use session::Session;
pub use sink::{EventSink, HttpSink, RecordingSink, SentEvent};
pub use tracker::{OrderProvider, SharedOrder};
