pub mod message;
pub mod validation;

pub use message::{escape_html, format_telegram_message, render_signal_line};
pub use validation::validate_signal;

/// Decimal places for a price: micro-priced tokens get more precision.
pub fn price_decimals(price: f64) -> usize {
    if price < 1.0 {
        6
    } else if price < 100.0 {
        4
    } else {
        2
    }
}

pub fn format_price(price: f64) -> String {
    format!("{:.*}", price_decimals(price), price)
}
