//! Subscriber installation for binaries

use std::str::FromStr;
use std::sync::Once;

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output style of the process-wide subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines on stderr
    Development,
    /// One JSON object per event on stderr
    Production,
    /// Nothing installed beyond a bare registry; see `test_capture`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "tablediff=debug",
            Profile::Production | Profile::Test => "tablediff=info",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Profile::Development),
            "prod" | "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown log profile '{}'", other)),
        }
    }
}

static INSTALLED: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. Library code never calls
/// this; binaries call it once at startup.
///
/// ```
/// use tablediff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INSTALLED.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter());
        // An already-installed subscriber (e.g. a test harness) wins.
        let _ = match profile {
            Profile::Development => builder.finish().try_init(),
            Profile::Production => builder.json().finish().try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
