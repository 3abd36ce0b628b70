//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "gedcom_core=debug,gedcom_store=debug,gedcom_cli=debug",
            Profile::Production => "gedcom_core=info,gedcom_store=info,gedcom_cli=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup. Later calls are ignored, whatever
/// profile they name. `RUST_LOG` overrides the profile's default filter.
///
/// Logs go to stderr so that commands writing GEDCOM or JSON to stdout stay
/// pipeable.
///
/// ```
/// use gedcom_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()))
        };
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Test => {
                // Capture is installed separately via init_test_capture()
                tracing_subscriber::registry().init();
            }
        }
    });
}
