use std::time::Duration;

use chrono_tz::Tz;

use crate::config::{Config, OutputStyle};
use crate::feed::SignalFeed;
use crate::models::{TakeProfitLevels, TradeSignal};

/// A BTCUSDT signal with sane prices; `targets` empty means no level list.
pub fn make_signal(signal_type: &str, targets: &[f64]) -> TradeSignal {
    make_signal_with_id("sig-1", signal_type, targets)
}

pub fn make_signal_with_id(id: &str, signal_type: &str, targets: &[f64]) -> TradeSignal {
    let levels = if targets.is_empty() {
        TakeProfitLevels::Absent
    } else {
        TakeProfitLevels::Targets(targets.to_vec())
    };

    let mut signal = TradeSignal::new("BTCUSDT", signal_type, levels);
    signal.id = id.to_string();
    signal.entry_price = Some(100.0);
    signal.stop_loss = Some(95.0);
    signal.confidence = Some(0.85);
    signal.strategy_name = Some("Trend Rider".to_string());
    signal.timestamp = Some("2024-01-15T12:00:00Z".to_string());
    signal
}

/// A Config suitable for testing, independent of the process environment.
pub fn default_test_config() -> Config {
    Config {
        backend_url: "http://127.0.0.1:9".to_string(),
        signal_feed: SignalFeed::Recent,
        poll_interval: Duration::from_secs(1),
        request_timeout: Duration::from_secs(1),
        display_timezone: Tz::UTC,
        output: OutputStyle::Line,
        log_level: "debug".to_string(),
    }
}
