use crate::error::SignalRejection;
use crate::models::TradeSignal;

/// Reject signals that would show zero or garbage prices.
pub fn validate_signal(signal: &TradeSignal) -> Result<(), SignalRejection> {
    if !is_positive(signal.entry_price) {
        return Err(SignalRejection::ZeroEntryPrice {
            symbol: signal.symbol.clone(),
        });
    }

    if !is_positive(signal.stop_loss) {
        return Err(SignalRejection::ZeroStopLoss {
            symbol: signal.symbol.clone(),
        });
    }

    let targets = signal.levels.as_slice();
    if targets.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        return Err(SignalRejection::InvalidTargets {
            symbol: signal.symbol.clone(),
            targets: targets.to_vec(),
        });
    }

    Ok(())
}

fn is_positive(price: Option<f64>) -> bool {
    matches!(price, Some(p) if p.is_finite() && p > 0.0)
}
