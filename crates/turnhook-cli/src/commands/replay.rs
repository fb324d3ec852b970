//! Scripted encounter replay command
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "event": "new-encounter", "order": [ { "id": "x", "name": "Goblin" } ] },
//!   { "event": "start-encounter" },
//!   { "event": "update", "order": [ { "id": "x", "name": "Goblin", "hp": 3 } ] },
//!   { "event": "next" }
//! ]
//! ```
//!
//! A step with an `order` replaces the tracker roster before its event is
//! dispatched; a step without one reuses the previous roster.

use clap::Args;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use turnhook_core::settings::ENV_WEBHOOK;
use turnhook_core::{Combatant, ExError, TurnhookError, WebhookSettings};
use turnhook_dispatch::{Dispatcher, EventSink, HttpSink, Notification, SharedOrder, WebhookEvent};

/// Endpoint reported for dry runs that have no webhook configured
const DRY_RUN_ENDPOINT: &str = "stdout";

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Script of events to replay
    pub script: PathBuf,

    /// Webhook URI (overrides config file and environment)
    #[arg(long)]
    pub webhook: Option<String>,

    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print envelopes as JSON lines instead of posting them
    #[arg(long)]
    pub dry_run: bool,

    /// How long to wait for in-flight requests before exiting
    #[arg(long, default_value_t = 500)]
    pub linger_ms: u64,
}

/// One entry of a replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayStep {
    pub event: Notification,
    #[serde(default)]
    pub order: Option<Vec<Combatant>>,
}

/// Writes each envelope to stdout as one JSON line.
struct StdoutSink;

impl EventSink for StdoutSink {
    fn send(&self, _settings: &WebhookSettings, event: &WebhookEvent) {
        let mut out = std::io::stdout().lock();
        if serde_json::to_writer(&mut out, event).is_ok() {
            let _ = writeln!(out);
        }
    }
}

pub fn execute(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let steps = load_script(&args.script)?;
    let mut settings = resolve_settings(&args)?;

    if args.dry_run && !settings.is_enabled() {
        settings = WebhookSettings::new(DRY_RUN_ENDPOINT);
    }
    if !settings.is_enabled() {
        return Err(format!(
            "No webhook configured (use --webhook, --config or {})",
            ENV_WEBHOOK
        )
        .into());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let sink: Arc<dyn EventSink> = if args.dry_run {
        Arc::new(StdoutSink)
    } else {
        Arc::new(HttpSink::on_runtime(runtime.handle().clone()))
    };

    let tracker = Arc::new(SharedOrder::default());
    let mut dispatcher = Dispatcher::new(sink);
    dispatcher.attach_tracker(tracker.clone());
    dispatcher.configure(settings);

    for step in &steps {
        if let Some(order) = &step.order {
            tracker.set_order(order.clone());
        }
        dispatcher.notify(step.event);
    }

    if !args.dry_run {
        std::thread::sleep(Duration::from_millis(args.linger_ms));
        eprintln!(
            "Replayed {} events (encounter {})",
            steps.len(),
            dispatcher.encounter_id()
        );
    }
    runtime.shutdown_timeout(Duration::from_millis(100));

    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ReplayStep>, ExError> {
    let describe = |err: TurnhookError| {
        let ex: ExError = err.into();
        let message = format!("{}: {}", path.display(), ex.message());
        ex.with_op("load_script").with_message(message)
    };

    let bytes = std::fs::read(path).map_err(|e| describe(e.into()))?;
    serde_json::from_slice(&bytes).map_err(|e| describe(e.into()))
}

/// Config file, then environment, then `--webhook`.
fn resolve_settings(args: &ReplayArgs) -> Result<WebhookSettings, ExError> {
    let base = match &args.config {
        Some(path) => WebhookSettings::load(path)?,
        None => WebhookSettings::default(),
    };
    let mut settings = base
        .with_env_overrides()
        .map_err(|e| ExError::from(e).with_op("resolve_settings"))?;

    if let Some(webhook) = &args.webhook {
        settings = WebhookSettings::new(webhook.clone()).with_timeout_ms(settings.timeout_ms);
    }
    Ok(settings)
}
