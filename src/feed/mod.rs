pub mod backend;
pub mod poller;

pub use backend::BackendClient;
pub use poller::SignalPoller;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::models::TradeSignal;

/// Signal lists the backend serves under `/api/signals?type=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalFeed {
    Active,
    Recent,
    Missed,
    Lowest,
}

impl SignalFeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalFeed::Active => "active",
            SignalFeed::Recent => "recent",
            SignalFeed::Missed => "missed",
            SignalFeed::Lowest => "lowest",
        }
    }
}

impl fmt::Display for SignalFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalFeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(SignalFeed::Active),
            "recent" => Ok(SignalFeed::Recent),
            "missed" => Ok(SignalFeed::Missed),
            "lowest" => Ok(SignalFeed::Lowest),
            other => Err(format!("unknown signal feed: {other}")),
        }
    }
}

/// Decode a feed response record by record; malformed records are logged and dropped.
pub fn parse_signals(records: Vec<Value>) -> Vec<TradeSignal> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| match serde_json::from_value::<TradeSignal>(raw) {
            Ok(signal) => Some(signal),
            Err(e) => {
                warn!("Skipping malformed signal #{}: {}", i, e);
                None
            }
        })
        .collect()
}

#[async_trait]
pub trait SignalSource: Send + Sync {
    async fn fetch_signals(&mut self, feed: SignalFeed) -> Result<Vec<TradeSignal>>;
}
