use crate::error::FormatError;
use crate::models::{Direction, SignalType, TakeProfitLevels};

/// Anything that carries a signal type and one take-profit list.
pub trait TakeProfitCarrier: Clone {
    fn signal_type(&self) -> &SignalType;
    fn take_profit_levels(&self) -> &TakeProfitLevels;
    /// Copy of `self` with only the level list replaced.
    fn with_take_profit_levels(&self, levels: TakeProfitLevels) -> Self;
}

/// Return `levels` in display order for `direction`: ascending for BUY,
/// descending for SELL. The input slice is left as it was.
pub fn order_levels(direction: Direction, levels: &[f64]) -> Vec<f64> {
    let mut ordered = levels.to_vec();
    match direction {
        Direction::Buy => ordered.sort_by(|a, b| a.total_cmp(b)),
        Direction::Sell => ordered.sort_by(|a, b| b.total_cmp(a)),
    }
    ordered
}

/// Strict variant of [`order_levels`] taking raw direction text.
pub fn order_levels_str(direction: &str, levels: &[f64]) -> Result<Vec<f64>, FormatError> {
    let direction: Direction = direction.parse()?;
    Ok(order_levels(direction, levels))
}

/// Reorder the take-profit list of `signal` for display.
///
/// Signals without levels, or whose type is neither BUY nor SELL, come back
/// unchanged. This sits on the render path, so it never fails.
pub fn format_signal<T: TakeProfitCarrier>(signal: &T) -> T {
    let levels = signal.take_profit_levels();
    let Some(direction) = signal.signal_type().direction() else {
        return signal.clone();
    };
    if levels.is_empty() {
        return signal.clone();
    }

    signal.with_take_profit_levels(levels.map_values(|v| order_levels(direction, v)))
}
