pub mod take_profit;

pub use take_profit::{format_signal, order_levels, order_levels_str, TakeProfitCarrier};
