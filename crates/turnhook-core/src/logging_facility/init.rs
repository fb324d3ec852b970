//! Global subscriber setup

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug and up
    Development,
    /// One JSON object per line, info and up
    Production,
    /// No output; tests install capture via `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(self) -> &'static str {
        match self {
            Profile::Development => "turnhook_core=debug,turnhook_dispatch=debug,turnhook_cli=debug",
            Profile::Production => "turnhook_core=info,turnhook_dispatch=info,turnhook_cli=info",
            Profile::Test => "off",
        }
    }

    fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_filter()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has an effect, and a subscriber already
/// installed by an embedding host is left alone. Output goes to stderr.
///
/// ```
/// use turnhook_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!(?profile, "global subscriber already set");
        }
    });
}
