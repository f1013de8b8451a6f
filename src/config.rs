//! Configuration types for radarr-autograb

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Radarr server connection settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RadarrConfig {
    /// Base URL of the Radarr instance (e.g., "http://localhost:7878")
    #[serde(default)]
    pub base_url: String,

    /// API key for the Radarr instance (Settings → General → Security)
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for RadarrConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout: default_timeout(),
        }
    }
}

/// Retry configuration for the release-listing stage
///
/// The attempt budget bounds the fetch stage only; the grab command is never
/// retried.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of extra attempts after the first (default: 2)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before the first retry (default: 500 milliseconds)
    #[serde(default = "default_initial_delay", with = "duration_millis_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 10 seconds)
    #[serde(default = "default_max_delay", with = "duration_millis_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Knobs for the fallback point-based release heuristic
///
/// The heuristic only runs when the custom-format score of the best release
/// is zero; see [`crate::selector::find_best_release`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points per seeder (default: 2)
    #[serde(default = "default_seeder_weight")]
    pub seeder_weight: i64,

    /// Seeder count cap before weighting (default: 100)
    #[serde(default = "default_seeder_cap")]
    pub seeder_cap: u32,

    /// Penalty applied to releases Radarr has marked rejected (default: 100)
    #[serde(default = "default_rejected_penalty")]
    pub rejected_penalty: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            seeder_weight: default_seeder_weight(),
            seeder_cap: default_seeder_cap(),
            rejected_penalty: default_rejected_penalty(),
        }
    }
}

/// Main configuration for [`crate::AutoGrabber`]
///
/// Fields are organized into logical sub-configs:
/// - [`radarr`](RadarrConfig) — server URL, API key, request timeout
/// - [`retry`](RetryConfig) — fetch-stage retry policy
/// - [`scoring`](ScoringConfig) — fallback heuristic weights
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Radarr server connection settings
    #[serde(default)]
    pub radarr: RadarrConfig,

    /// Fetch-stage retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Fallback heuristic weights
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl Config {
    /// Validate the configuration, rejecting unusable values
    pub fn validate(&self) -> Result<()> {
        if self.radarr.base_url.is_empty() {
            return Err(Error::Config {
                message: "base_url must not be empty".into(),
                key: Some("radarr.base_url".into()),
            });
        }
        if self.radarr.api_key.is_empty() {
            return Err(Error::Config {
                message: "api_key must not be empty".into(),
                key: Some("radarr.api_key".into()),
            });
        }
        Ok(())
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_attempts() -> u32 {
    2
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_seeder_weight() -> i64 {
    2
}

fn default_seeder_cap() -> u32 {
    100
}

fn default_rejected_penalty() -> i64 {
    100
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration serialization helper (milliseconds, for sub-second retry delays)
mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
