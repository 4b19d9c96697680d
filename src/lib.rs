pub mod config;
pub mod display;
pub mod error;
pub mod feed;
pub mod formatting;
pub mod models;
#[cfg(test)]
pub mod test_helpers;
