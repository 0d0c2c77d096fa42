use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::Duration;
use rocket::figment::Figment;
use serde::{Deserialize, Serialize};

use crate::errors::*;

/// Settings read from the `exchange` table of `Rocket.toml`, or from a
/// `ROCKET_EXCHANGE` environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Plaintext file holding the partner signing secret.
    pub secret_path: PathBuf,
    pub database_path: PathBuf,
    pub timestamp_header: String,
    pub signature_header: String,
    /// Maximum allowed distance between a request's timestamp and the
    /// server clock. `None` disables the freshness check.
    pub max_clock_skew_secs: Option<u64>,
    pub store_timeout_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            secret_path: PathBuf::from("signingSecret.txt"),
            database_path: PathBuf::from("reservations.json"),
            timestamp_header: "X-Ib-Exchange-Req-Timestamp".into(),
            signature_header: "X-Ib-Exchange-Req-Signature".into(),
            max_clock_skew_secs: None,
            store_timeout_ms: 5_000,
        }
    }
}

#[derive(Deserialize, Default)]
struct Settings {
    #[serde(default)]
    exchange: ExchangeConfig,
}

impl ExchangeConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let settings: Settings = figment
            .extract()
            .map_err(|e| Error::from(format!("invalid exchange configuration: {}", e)))?;

        Ok(settings.exchange)
    }

    pub fn max_clock_skew(&self) -> Option<Duration> {
        self.max_clock_skew_secs
            .map(|secs| Duration::seconds(secs.min(i64::MAX as u64 / 1_000) as i64))
    }

    pub fn store_timeout(&self) -> StdDuration {
        StdDuration::from_millis(self.store_timeout_ms)
    }
}
