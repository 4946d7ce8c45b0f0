//! Logging initialization
//!
//! `RUST_LOG` always wins over the profile's default filter.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `pagegraph=debug`
    Development,
    /// JSON lines, `pagegraph=info`
    Production,
    /// Bare registry; pair with [`super::init_test_capture`] for assertions
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "pagegraph=debug",
            Profile::Production => "pagegraph=info",
            Profile::Test => "off",
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_filter()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has any effect. If another subscriber was already
/// installed as the global default (a test capture, say) this leaves it in
/// place.
///
/// # Example
///
/// ```
/// use pagegraph_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if !installed {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}
