use serde_json::{json, Value};

/// Backend-shaped JSON for one signal.
pub fn signal_json(id: &str, signal_type: &str, targets: &[f64]) -> Value {
    json!({
        "id": id,
        "symbol": "ETHUSDT",
        "type": signal_type,
        "entryPrice": 2500.0,
        "stopLoss": 2450.0,
        "confidence": 0.72,
        "timestamp": "2024-03-01T09:30:00Z",
        "status": "active",
        "exchange": "Binance",
        "strategyName": "Breakout",
        "targets": targets,
    })
}
