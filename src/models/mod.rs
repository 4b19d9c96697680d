pub mod direction;
pub mod signal;

pub use direction::{Direction, SignalType};
pub use signal::{TakeProfitLevels, TradeSignal};
