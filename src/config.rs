use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::feed::SignalFeed;

/// How new signals are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    Line,
    Telegram,
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStyle::Line => write!(f, "line"),
            OutputStyle::Telegram => write!(f, "telegram"),
        }
    }
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(OutputStyle::Line),
            "telegram" => Ok(OutputStyle::Telegram),
            other => Err(format!("unknown output style: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend
    pub backend_url: String,
    pub signal_feed: SignalFeed,
    pub poll_interval: Duration,
    pub request_timeout: Duration,

    // Display
    pub display_timezone: Tz,
    pub output: OutputStyle,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            backend_url: env("BACKEND_URL", "http://localhost:8000")
                .trim_end_matches('/')
                .to_string(),
            signal_feed: env("SIGNAL_FEED", "recent")
                .parse()
                .unwrap_or(SignalFeed::Recent),
            poll_interval: Duration::from_secs(
                env("POLL_INTERVAL", "30").parse::<u64>().unwrap_or(30).max(1),
            ),
            request_timeout: Duration::from_secs(
                env("REQUEST_TIMEOUT", "10").parse::<u64>().unwrap_or(10),
            ),
            display_timezone: env("DISPLAY_TZ", "UTC").parse().unwrap_or(Tz::UTC),
            output: env("OUTPUT", "line").parse().unwrap_or(OutputStyle::Line),
            log_level: env("LOG_LEVEL", "info"),
        }
    }
}
