use anyhow::Result;
use chrono::DateTime;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

use crate::feed::{SignalFeed, SignalSource};
use crate::formatting::format_signal;
use crate::models::TradeSignal;

const MAX_SEEN: usize = 100;
const KEEP_SEEN: usize = 50;

/// Ids of signals already handed out, bounded so a long session does not grow.
#[derive(Debug, Default)]
pub struct SeenSignals {
    order: VecDeque<String>,
    ids: HashSet<String>,
}

impl SeenSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`; returns false if it was already known.
    pub fn insert(&mut self, id: &str) -> bool {
        if !self.ids.insert(id.to_string()) {
            return false;
        }
        self.order.push_back(id.to_string());

        if self.order.len() > MAX_SEEN {
            while self.order.len() > KEEP_SEEN {
                if let Some(old) = self.order.pop_front() {
                    self.ids.remove(&old);
                }
            }
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.ids.clear();
    }
}

/// Identity used for dedup: the backend id, or for id-less records a key
/// built from symbol, type, entry price, strategy and the signal's minute.
pub fn dedup_key(signal: &TradeSignal) -> String {
    if !signal.id.trim().is_empty() {
        return signal.id.clone();
    }

    let minute = signal
        .timestamp
        .as_deref()
        .map(|ts| match DateTime::parse_from_rfc3339(ts) {
            Ok(t) => (t.timestamp() / 60).to_string(),
            Err(_) => ts.to_string(),
        })
        .unwrap_or_default();

    format!(
        "{}_{}_{}_{}_{}",
        signal.symbol,
        signal.signal_type,
        signal.entry_price.map(|p| p.to_string()).unwrap_or_default(),
        signal.strategy_name.as_deref().unwrap_or_default(),
        minute
    )
}

/// Pulls a feed from a [`SignalSource`] and yields only signals not seen before,
/// with their take-profit levels in display order.
pub struct SignalPoller {
    source: Box<dyn SignalSource>,
    feed: SignalFeed,
    seen: SeenSignals,
}

impl SignalPoller {
    pub fn new(source: Box<dyn SignalSource>, feed: SignalFeed) -> Self {
        Self {
            source,
            feed,
            seen: SeenSignals::new(),
        }
    }

    pub fn feed(&self) -> SignalFeed {
        self.feed
    }

    pub async fn poll(&mut self) -> Result<Vec<TradeSignal>> {
        let batch = self.source.fetch_signals(self.feed).await?;
        let total = batch.len();

        let fresh: Vec<TradeSignal> = batch
            .iter()
            .filter(|s| self.seen.insert(&dedup_key(s)))
            .map(format_signal)
            .collect();

        debug!("Poll {}: {} fetched, {} new", self.feed, total, fresh.len());
        Ok(fresh)
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }
}
