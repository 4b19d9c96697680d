use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Invalid signal type: {0:?}. Must be 'SELL' or 'BUY'")]
    InvalidDirection(String),
}

/// Reasons a signal is refused before it is broadcast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalRejection {
    #[error("Invalid signal: zero entry price for {symbol}")]
    ZeroEntryPrice { symbol: String },

    #[error("Invalid signal: zero stop loss for {symbol}")]
    ZeroStopLoss { symbol: String },

    #[error("Invalid signal: zero or invalid targets for {symbol}: {targets:?}")]
    InvalidTargets { symbol: String, targets: Vec<f64> },
}
