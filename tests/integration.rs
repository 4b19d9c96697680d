mod common;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;

use signal_desk::display::{format_telegram_message, render_signal_line};
use signal_desk::feed::{parse_signals, SignalFeed, SignalPoller, SignalSource};
use signal_desk::formatting::format_signal;
use signal_desk::models::{Direction, TakeProfitLevels, TradeSignal};

use common::signal_json;

/// A signal source that replays canned backend responses, one per poll.
struct MockSource {
    batches: VecDeque<Result<Value>>,
}

impl MockSource {
    fn new(batches: Vec<Result<Value>>) -> Self {
        Self {
            batches: batches.into(),
        }
    }
}

#[async_trait]
impl SignalSource for MockSource {
    async fn fetch_signals(&mut self, _feed: SignalFeed) -> Result<Vec<TradeSignal>> {
        match self.batches.pop_front() {
            Some(Ok(body)) => Ok(parse_signals(serde_json::from_value(body)?)),
            Some(Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

#[tokio::test]
async fn poller_formats_and_dedups_backend_signals() {
    let first = json!([
        signal_json("a", "buy", &[2700.0, 2600.0, 2650.0]),
        signal_json("b", "SELL", &[2300.0, 2400.0, 2350.0]),
    ]);
    let second = json!([
        signal_json("b", "SELL", &[2300.0, 2400.0, 2350.0]),
        signal_json("c", "HOLD", &[3.0, 1.0, 2.0]),
    ]);
    let source = MockSource::new(vec![Ok(first), Ok(second)]);
    let mut poller = SignalPoller::new(Box::new(source), SignalFeed::Active);

    let batch = poller.poll().await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].signal_type.direction(), Some(Direction::Buy));
    assert_eq!(
        batch[0].levels,
        TakeProfitLevels::Targets(vec![2600.0, 2650.0, 2700.0])
    );
    assert_eq!(
        batch[1].levels,
        TakeProfitLevels::Targets(vec![2400.0, 2350.0, 2300.0])
    );

    let batch = poller.poll().await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].id, "c");
    assert_eq!(batch[0].levels, TakeProfitLevels::Targets(vec![3.0, 1.0, 2.0]));
}

#[tokio::test]
async fn poller_surfaces_fetch_errors_and_recovers() {
    let source = MockSource::new(vec![
        Err(anyhow::anyhow!("fetch_signals failed: 502 Bad Gateway")),
        Ok(json!([signal_json("a", "SELL", &[1.0, 2.0])])),
    ]);
    let mut poller = SignalPoller::new(Box::new(source), SignalFeed::Recent);

    let err = poller.poll().await.unwrap_err();
    assert!(err.to_string().contains("502"));

    let batch = poller.poll().await.unwrap();
    assert_eq!(batch[0].levels, TakeProfitLevels::Targets(vec![2.0, 1.0]));
}

#[tokio::test]
async fn poller_reset_shows_signals_again() {
    let body = json!([signal_json("a", "BUY", &[2.0, 1.0])]);
    let source = MockSource::new(vec![Ok(body.clone()), Ok(body.clone()), Ok(body)]);
    let mut poller = SignalPoller::new(Box::new(source), SignalFeed::Missed);

    assert_eq!(poller.poll().await.unwrap().len(), 1);
    assert!(poller.poll().await.unwrap().is_empty());
    poller.reset();
    assert_eq!(poller.poll().await.unwrap().len(), 1);
    assert_eq!(poller.feed(), SignalFeed::Missed);
}

#[tokio::test]
async fn malformed_record_is_skipped_not_the_batch() {
    let body = json!([
        { "id": "x", "type": "BUY", "targets": [1.0], "tp_levels": [2.0] },
        signal_json("y", "BUY", &[2.0, 1.0]),
    ]);
    let source = MockSource::new(vec![Ok(body)]);
    let mut poller = SignalPoller::new(Box::new(source), SignalFeed::Active);

    let batch = poller.poll().await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].id, "y");
    assert_eq!(batch[0].levels, TakeProfitLevels::Targets(vec![1.0, 2.0]));
}

#[tokio::test]
async fn signals_without_id_are_deduplicated() {
    let mut record = signal_json("", "SELL", &[2300.0, 2400.0]);
    record.as_object_mut().unwrap().remove("id");
    let mut later = record.clone();
    later["timestamp"] = json!("2024-03-01T09:35:00Z");

    let source = MockSource::new(vec![
        Ok(json!([record.clone()])),
        Ok(json!([record])),
        Ok(json!([later])),
    ]);
    let mut poller = SignalPoller::new(Box::new(source), SignalFeed::Recent);

    assert_eq!(poller.poll().await.unwrap().len(), 1);
    assert!(poller.poll().await.unwrap().is_empty());
    assert_eq!(poller.poll().await.unwrap().len(), 1);
}

#[tokio::test]
async fn router_shaped_signal_renders() {
    let body = json!([{
        "id": "recent_BTCUSDT_1700000000",
        "symbol": "BTCUSDT",
        "title": "Entry: $100.0000",
        "subtitle": "SELL Signal",
        "confidence": 85,
        "price": 100.0,
        "stop_loss": 105.0,
        "targets": [80, 95, 90],
        "timestamp": "2023-11-14T22:13:20Z",
        "raw_data": { "anomaly_score": 0.4 }
    }]);
    let source = MockSource::new(vec![Ok(body)]);
    let mut poller = SignalPoller::new(Box::new(source), SignalFeed::Recent);

    let batch = poller.poll().await.unwrap();
    assert_eq!(batch.len(), 1);
    let signal = &batch[0];
    assert_eq!(signal.signal_type.direction(), Some(Direction::Sell));
    assert_eq!(signal.entry_price, Some(100.0));
    assert_eq!(signal.stop_loss, Some(105.0));

    assert_eq!(
        render_signal_line(signal),
        "Signal Type: SELL, Take Profit Levels: T1: $95.0000, T2: $90.0000, T3: $80.0000"
    );

    let msg = format_telegram_message(signal, chrono_tz::Tz::UTC).unwrap();
    assert!(msg.starts_with("🔻 <b>SELL Setup</b> | #BTCUSDT"));
    assert!(msg.contains("🧠 <b>Confidence:</b> 85.00%"));
    assert!(msg.contains("🎯 <b>Entry:</b> 100.00"));
    assert!(msg.contains("🛑 <b>Stop:</b> 105.00"));

    let out = serde_json::to_value(signal).unwrap();
    assert_eq!(out["raw_data"]["anomaly_score"], json!(0.4));
}

#[test]
fn tp_levels_payload_keeps_its_key_through_formatting() {
    let raw = json!({ "id": "t", "type": "SELL", "tp_levels": [5.0, 1.0, 3.0], "anomaly_score": 40 });
    let signal: TradeSignal = serde_json::from_value(raw).unwrap();

    let out = serde_json::to_value(format_signal(&signal)).unwrap();
    assert_eq!(out["tp_levels"], json!([5.0, 3.0, 1.0]));
    assert!(out.get("targets").is_none());
    assert_eq!(out["anomaly_score"], json!(40));
}

#[test]
fn original_order_survives_formatting() {
    let signal: TradeSignal =
        serde_json::from_value(signal_json("a", "BUY", &[30.0, 10.0, 20.0])).unwrap();
    let snapshot = signal.levels.as_slice().to_vec();

    let formatted = format_signal(&signal);
    assert_eq!(signal.levels.as_slice(), snapshot.as_slice());
    assert_eq!(formatted.levels.as_slice(), &[10.0, 20.0, 30.0]);
}

#[test]
fn renderers_agree_on_order() {
    let signal: TradeSignal =
        serde_json::from_value(signal_json("a", "sell", &[2300.0, 2400.0])).unwrap();

    let line = render_signal_line(&signal);
    assert!(line.find("$2400.00").unwrap() < line.find("$2300.00").unwrap());

    let msg = format_telegram_message(&signal, chrono_tz::Tz::UTC).unwrap();
    assert!(msg.contains("T1: 2400.00\nT2: 2300.00"));
    assert!(msg.contains("🤔 <b>Confidence:</b> 72.00%"));
}
