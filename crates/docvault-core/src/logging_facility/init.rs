//! Subscriber installation
//!
//! The binaries call `init` once, with the profile chosen by `--log-format`.
//! `RUST_LOG` replaces the profile's default filter when set.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output format and default verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug for docvault crates
    Development,
    /// One JSON object per line, info for docvault crates
    Production,
    /// Nothing is printed; tests install `init_test_capture` instead
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "docvault=debug,tower_http=info",
            Profile::Production => "docvault=info,tower_http=warn",
            Profile::Test => "off",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    /// Parse the `--log-format` values accepted by the binaries
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(Profile::Development),
            "json" | "prod" | "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!(
                "unknown log format '{}' (expected pretty or json)",
                other
            )),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has an effect. If another subscriber is already
/// installed (a test capture, for instance) it is left in place.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Test => return,
        };
        if let Err(e) = installed {
            eprintln!("docvault: logging not initialized: {}", e);
        }
    });
}
