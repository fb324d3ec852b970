//! The webhook event dispatcher.
//!
//! Hosts call one `notify_*` operation per state transition. Each call is a
//! no-op until both a tracker is attached and enabled settings are
//! configured. Otherwise it:
//!
//! 1. reads the current order from the tracker
//! 2. for `new-encounter`, resets the step and issues a new encounter id
//! 3. for `update`, diffs the remembered roster against the current one
//! 4. hands the envelope (carrying the pre-increment step) to the sink
//! 5. advances the step and remembers the current roster
//!
//! Nothing is returned: delivery is fire-and-forget.

use crate::event::{Notification, WebhookEvent};
use crate::session::Session;
use crate::sink::EventSink;
use crate::tracker::OrderProvider;
use std::sync::Arc;
use std::time::Instant;
use turnhook_core::{compute_changes, log_op_end, log_op_skipped, log_op_start};
use turnhook_core::{Combatant, WebhookSettings};
use turnhook_core_types::EncounterId;

pub struct Dispatcher {
    sink: Arc<dyn EventSink>,
    tracker: Option<Arc<dyn OrderProvider>>,
    settings: Option<WebhookSettings>,
    session: Session,
}

impl Dispatcher {
    /// An inert dispatcher delivering through `sink`
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            tracker: None,
            settings: None,
            session: Session::new(),
        }
    }

    pub fn attach_tracker(&mut self, tracker: Arc<dyn OrderProvider>) {
        self.tracker = Some(tracker);
    }

    /// Replace the destination settings. Disabled settings silence the
    /// dispatcher without discarding session state.
    pub fn configure(&mut self, settings: WebhookSettings) {
        self.settings = Some(settings);
    }

    /// Drop tracker and settings and reset the session.
    pub fn detach(&mut self) {
        self.tracker = None;
        self.settings = None;
        self.session = Session::new();
    }

    /// True when a notification would produce an event
    pub fn is_active(&self) -> bool {
        self.tracker.is_some() && self.settings.as_ref().is_some_and(|s| s.is_enabled())
    }

    pub fn settings(&self) -> Option<&WebhookSettings> {
        self.settings.as_ref()
    }

    /// Step the next emitted event will carry
    pub fn step(&self) -> u64 {
        self.session.step()
    }

    pub fn encounter_id(&self) -> &EncounterId {
        self.session.encounter_id()
    }

    /// Roster as of the last emitted event
    pub fn last_order(&self) -> &[Combatant] {
        self.session.last_order()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notify_new_encounter(&mut self) {
        self.notify(Notification::NewEncounter);
    }

    pub fn notify_encounter_started(&mut self) {
        self.notify(Notification::StartEncounter);
    }

    pub fn notify_update(&mut self) {
        self.notify(Notification::Update);
    }

    pub fn notify_next(&mut self) {
        self.notify(Notification::Next);
    }

    pub fn notify_previous(&mut self) {
        self.notify(Notification::Previous);
    }

    /// Emit one event of `kind`, or do nothing when inactive.
    pub fn notify(&mut self, kind: Notification) {
        let op = kind.op_name();

        let Some(tracker) = self.tracker.as_ref() else {
            log_op_skipped!(op, reason = "no tracker attached");
            return;
        };
        let Some(settings) = self.settings.as_ref().filter(|s| s.is_enabled()) else {
            log_op_skipped!(op, reason = "no webhook configured");
            return;
        };

        let started = Instant::now();
        log_op_start!(op, event_type = kind.as_str(), step = self.session.step());

        let order = tracker.current_order();
        if kind == Notification::NewEncounter {
            self.session.start_new_encounter();
        }

        let changes = if kind == Notification::Update {
            compute_changes(self.session.last_order(), &order)
        } else {
            Vec::new()
        };
        let changes_len = changes.len();
        let order_len = order.len();
        let step = self.session.step();

        let event = WebhookEvent::new(
            kind,
            step,
            order,
            self.session.encounter_id().clone(),
            changes,
        );
        self.sink.send(settings, &event);

        self.session.advance();
        self.session.remember(event.into_order());

        log_op_end!(
            op,
            duration_ms = started.elapsed().as_millis() as u64,
            event_type = kind.as_str(),
            step = step,
            encounter_id = %self.session.encounter_id(),
            order_len = order_len as u64,
            changes_len = changes_len as u64
        );
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tracker_attached", &self.tracker.is_some())
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish()
    }
}
