mod watcher;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use signal_desk::config::{Config, OutputStyle};
use signal_desk::feed::{BackendClient, SignalFeed};

use crate::watcher::SignalWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cfg = Config::from_env();

    // Optional positional overrides: [feed] [line|telegram]
    let args: Vec<String> = std::env::args().collect();
    if let Some(feed) = args.get(1).and_then(|s| s.parse::<SignalFeed>().ok()) {
        cfg.signal_feed = feed;
    }
    if let Some(output) = args.get(2).and_then(|s| s.parse::<OutputStyle>().ok()) {
        cfg.output = output;
    }

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let source = Box::new(BackendClient::new(&cfg)?);

    let mut watcher = SignalWatcher::new(cfg, source);
    watcher.run().await?;

    Ok(())
}
