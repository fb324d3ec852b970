//! Webhook destination settings.
//!
//! Settings come from an optional TOML file overlaid by environment
//! variables. Persisting them is the host application's business; this
//! module only reads.
//!
//! ```toml
//! webhook = "https://example.com/hooks/initiative"
//! timeout_ms = 5000
//! ```

use crate::errors::{Result, TurnhookError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use turnhook_core_types::Sensitive;

/// Environment variable overriding the webhook URI
pub const ENV_WEBHOOK: &str = "TURNHOOK_WEBHOOK";
/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_MS: &str = "TURNHOOK_TIMEOUT_MS";

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Destination configuration for emitted events.
///
/// The dispatcher is enabled exactly when `webhook` is non-empty after
/// trimming. The URI is wrapped in [`Sensitive`] because hook URLs commonly
/// embed access tokens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Endpoint receiving one POST per event
    pub webhook: Sensitive<String>,
    /// Per-request timeout for the HTTP sink
    pub timeout_ms: u64,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            webhook: Sensitive::new(String::new()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl WebhookSettings {
    /// Settings pointing at `webhook` with the default timeout
    pub fn new(webhook: impl Into<String>) -> Self {
        Self {
            webhook: Sensitive::new(webhook.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// True when a destination is configured
    pub fn is_enabled(&self) -> bool {
        !self.webhook.expose().trim().is_empty()
    }

    /// The trimmed endpoint URI, or `None` when disabled
    pub fn endpoint(&self) -> Option<&str> {
        let uri = self.webhook.expose().trim();
        if uri.is_empty() {
            None
        } else {
            Some(uri)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse settings from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// - `InvalidSettings`: the text is not valid TOML or a key has the wrong type
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    ///
    /// # Errors
    ///
    /// - `Io`: the file cannot be read
    /// - `InvalidSettings`: the contents do not parse
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Settings built from defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// - `InvalidSettings`: `TURNHOOK_TIMEOUT_MS` is not an integer
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `TURNHOOK_WEBHOOK` / `TURNHOOK_TIMEOUT_MS` on top of `self`.
    ///
    /// # Errors
    ///
    /// - `InvalidSettings`: `TURNHOOK_TIMEOUT_MS` is not an integer
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides resolved through `lookup` (keyed by env var name).
    ///
    /// # Errors
    ///
    /// - `InvalidSettings`: the timeout override is not an integer
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(webhook) = lookup(ENV_WEBHOOK) {
            self.webhook = Sensitive::new(webhook);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = raw
                .trim()
                .parse()
                .map_err(|e| TurnhookError::InvalidSettings {
                    reason: format!("{} must be an integer, got {:?}: {}", ENV_TIMEOUT_MS, raw, e),
                })?;
        }
        Ok(self)
    }
}
