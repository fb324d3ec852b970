//! Delivery of event envelopes.
//!
//! A sink receives each envelope exactly once and must not block or fail
//! the caller. [`HttpSink`] posts to the configured webhook on a detached
//! tokio task; [`RecordingSink`] keeps envelopes in memory for tests.

use crate::event::WebhookEvent;
use reqwest::header::CONTENT_TYPE;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use turnhook_core::{log_op_error, WebhookSettings};

/// Receives envelopes from the dispatcher.
pub trait EventSink: Send + Sync {
    /// Hand `event` off for delivery to `settings`' endpoint.
    ///
    /// Called only when `settings` is enabled. Must return promptly; delivery
    /// outcome is never reported back.
    fn send(&self, settings: &WebhookSettings, event: &WebhookEvent);
}

/// Posts each envelope as a JSON body to the webhook URI.
///
/// Requests run on a tokio runtime and are never awaited. Transport errors,
/// timeouts and non-2xx responses are logged at debug level and dropped.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    runtime: Option<Handle>,
}

impl HttpSink {
    pub fn new(client: reqwest::Client, runtime: Handle) -> Self {
        Self {
            client,
            runtime: Some(runtime),
        }
    }

    /// Sink with a default client spawning onto `runtime`
    pub fn on_runtime(runtime: Handle) -> Self {
        Self::new(reqwest::Client::new(), runtime)
    }

    /// Sink bound to the runtime of the calling context, if any.
    ///
    /// Without one, each send looks up the ambient runtime again and drops
    /// the event when there is none.
    pub fn from_current_runtime() -> Self {
        Self {
            client: reqwest::Client::new(),
            runtime: Handle::try_current().ok(),
        }
    }

    fn runtime(&self) -> Option<Handle> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
    }
}

impl Default for HttpSink {
    fn default() -> Self {
        Self::from_current_runtime()
    }
}

impl EventSink for HttpSink {
    fn send(&self, settings: &WebhookSettings, event: &WebhookEvent) {
        let Some(endpoint) = settings.endpoint() else {
            return;
        };

        let body = match event.to_json_bytes() {
            Ok(body) => body,
            Err(err) => {
                log_op_error!("http_sink_send", err, duration_ms = 0u64);
                return;
            }
        };

        let Some(runtime) = self.runtime() else {
            tracing::warn!(
                event_type = event.kind().as_str(),
                step = event.step(),
                "no tokio runtime available; webhook event dropped"
            );
            return;
        };

        let request = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .timeout(settings.timeout())
            .body(body);
        let event_type = event.kind().as_str();
        let step = event.step();

        // Detached: the join handle is dropped on purpose.
        drop(runtime.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(event_type, step, status = %response.status(), "webhook delivered");
                }
                Ok(response) => {
                    tracing::debug!(event_type, step, status = %response.status(), "webhook rejected event");
                }
                Err(err) => {
                    tracing::debug!(event_type, step, error = %err, "webhook delivery failed");
                }
            }
        }));
    }
}

/// One envelope captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentEvent {
    pub endpoint: String,
    pub event: WebhookEvent,
}

/// Keeps every envelope in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<SentEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in order
    pub fn sent(&self) -> Vec<SentEvent> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn events(&self) -> Vec<WebhookEvent> {
        self.sent().into_iter().map(|s| s.event).collect()
    }

    pub fn len(&self) -> usize {
        self.sent().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.sent.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl EventSink for RecordingSink {
    fn send(&self, settings: &WebhookSettings, event: &WebhookEvent) {
        let entry = SentEvent {
            endpoint: settings.endpoint().unwrap_or_default().to_string(),
            event: event.clone(),
        };
        match self.sent.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Notification;
    use turnhook_core::Combatant;
    use turnhook_core_types::EncounterId;

    fn event(step: u64) -> WebhookEvent {
        WebhookEvent::new(
            Notification::Next,
            step,
            vec![Combatant::new("a", "A")],
            EncounterId::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_recording_sink_shares_buffer_between_clones() {
        let sink = RecordingSink::new();
        let other = sink.clone();
        let settings = WebhookSettings::new(" https://x.test/h ");

        other.send(&settings, &event(0));
        other.send(&settings, &event(1));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.sent()[0].endpoint, "https://x.test/h");
        assert_eq!(sink.events()[1].step(), 1);

        sink.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_http_sink_without_runtime_drops_quietly() {
        let sink = HttpSink::from_current_runtime();
        sink.send(&WebhookSettings::new("http://127.0.0.1:9/h"), &event(0));
    }
}
