use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::feed::{parse_signals, SignalFeed, SignalSource};
use crate::models::TradeSignal;

const SIGNALS_PATH: &str = "/api/signals";

/// HTTP client for the dashboard backend's signal endpoints.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: cfg.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn signals_url(&self) -> String {
        format!("{}{}", self.base_url, SIGNALS_PATH)
    }

    pub async fn fetch_signals(&self, feed: SignalFeed) -> Result<Vec<TradeSignal>> {
        let resp = self
            .client
            .get(self.signals_url())
            .query(&[("type", feed.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} signals", feed))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("fetch_signals failed: {} {}", status, body);
        }

        let records: Vec<Value> = resp
            .json()
            .await
            .context("Failed to parse signals response")?;
        let total = records.len();
        let signals = parse_signals(records);

        debug!("Fetched {} {} signals ({} usable)", total, feed, signals.len());
        Ok(signals)
    }
}

#[async_trait]
impl SignalSource for BackendClient {
    async fn fetch_signals(&mut self, feed: SignalFeed) -> Result<Vec<TradeSignal>> {
        BackendClient::fetch_signals(self, feed).await
    }
}
