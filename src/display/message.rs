use chrono::DateTime;
use chrono_tz::Tz;

use crate::display::{format_price, validate_signal};
use crate::error::SignalRejection;
use crate::formatting::format_signal;
use crate::models::{Direction, TradeSignal};

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// One-line summary for list views.
pub fn render_signal_line(signal: &TradeSignal) -> String {
    let signal = format_signal(signal);

    let signal_type = if signal.signal_type.is_empty() {
        "UNKNOWN".to_string()
    } else {
        signal.signal_type.to_string()
    };

    let levels = signal.levels.as_slice();
    let tp_display = if levels.is_empty() {
        "none".to_string()
    } else {
        levels
            .iter()
            .enumerate()
            .map(|(i, tp)| format!("T{}: ${}", i + 1, format_price(*tp)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!("Signal Type: {signal_type}, Take Profit Levels: {tp_display}")
}

/// HTML message for a Telegram channel. Fails on signals with zero prices.
pub fn format_telegram_message(signal: &TradeSignal, tz: Tz) -> Result<String, SignalRejection> {
    validate_signal(signal)?;
    let signal = format_signal(signal);

    let is_long = signal.signal_type.direction() == Some(Direction::Buy)
        || signal.signal_type.as_str().to_lowercase().contains("long");
    let type_emoji = if is_long { "🚀" } else { "🔻" };

    let mut lines = vec![format!(
        "{} <b>{} Setup</b> | #{}",
        type_emoji,
        escape_html(&signal.signal_type.as_str().trim().to_uppercase()),
        escape_html(&signal.symbol)
    )];

    if let Some(confidence) = signal.confidence {
        let emoji = if confidence >= 0.8 {
            "🧠"
        } else if confidence >= 0.6 {
            "🤔"
        } else {
            "⚠️"
        };
        lines.push(format!(
            "{} <b>Confidence:</b> {:.2}%",
            emoji,
            confidence * 100.0
        ));
    }

    if let Some(strategy) = &signal.strategy_name {
        lines.push(format!("📊 <b>Strategy:</b> {}", escape_html(strategy)));
    }

    // validate_signal guarantees both are present
    let entry = signal.entry_price.unwrap_or_default();
    let stop = signal.stop_loss.unwrap_or_default();
    lines.push(format!("🎯 <b>Entry:</b> {}", format_price(entry)));

    let targets: Vec<f64> = signal
        .levels
        .as_slice()
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t > 0.0)
        .collect();
    if !targets.is_empty() {
        lines.push("<b>Take Profit Levels:</b>".to_string());
        for (i, t) in targets.iter().enumerate() {
            lines.push(format!("T{}: {}", i + 1, format_price(*t)));
        }
    } else if let Some(tp) = signal.take_profit {
        lines.push(format!("🎯 <b>Target:</b> {}", format_price(tp)));
    }

    lines.push(format!("🛑 <b>Stop:</b> {}", format_price(stop)));

    if let Some(leverage) = signal.leverage.filter(|l| *l > 0.0) {
        lines.push(format!("⚡ <b>Leverage:</b> {leverage}x"));
    }

    if let Some(ts) = &signal.timestamp {
        let shown = match DateTime::parse_from_rfc3339(ts) {
            Ok(t) => t.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
            Err(_) => escape_html(ts),
        };
        lines.push(format!("🕒 <b>Time:</b> {shown}"));
    }

    Ok(lines.join("\n"))
}
