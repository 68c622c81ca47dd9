use std::time::Duration;

use refiner_fabric::Network;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DurationSecondsWithFrac};
use tracing::warn;

/// Per-call deadline used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How to reach the refiner
///
/// ```json
/// { "network": "unix", "address": "/run/refiner.sock", "timeout": 5 }
/// ```
///
/// `network` defaults to `unix` and `timeout` (seconds, fractions allowed)
/// to 5. `address` is required.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinerConfig {
    #[serde(default)]
    pub network: Network,

    /// Socket path for `unix`, `host:port` for `tcp`
    pub address: String,

    /// Deadline for one complete request/response exchange
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            address: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RefinerConfig {
    /// Defaults with the given address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Set the transport kind
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from an optional configuration section
    ///
    /// A missing section yields the defaults. A section that does not parse
    /// is logged and also yields the defaults; with no address configured
    /// every call then fails as endpoint-unavailable.
    pub fn from_section(section: Option<Value>) -> Self {
        let Some(section) = section else {
            return Self::default();
        };

        serde_json::from_value(section).unwrap_or_else(|err| {
            warn!(error = %err, "failed to parse refiner configuration, falling back to defaults");
            Self::default()
        })
    }
}
