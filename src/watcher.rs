use anyhow::Result;
use std::future::Future;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{info, warn};

use signal_desk::config::{Config, OutputStyle};
use signal_desk::display::{format_telegram_message, render_signal_line};
use signal_desk::feed::{SignalPoller, SignalSource};
use signal_desk::models::TradeSignal;

pub struct SignalWatcher {
    cfg: Config,
    poller: SignalPoller,
    shown: usize,
    rejected: usize,
    failed_polls: usize,
}

impl SignalWatcher {
    pub fn new(cfg: Config, source: Box<dyn SignalSource>) -> Self {
        info!("{}", "=".repeat(60));
        info!("Signal desk starting up");
        info!("Backend: {}", cfg.backend_url);
        info!("Feed: {} every {}s", cfg.signal_feed, cfg.poll_interval.as_secs());
        info!("Output: {} ({})", cfg.output, cfg.display_timezone);
        info!("{}", "=".repeat(60));

        let poller = SignalPoller::new(source, cfg.signal_feed);

        Self {
            cfg,
            poller,
            shown: 0,
            rejected: 0,
            failed_polls: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Watching for signals. Press Ctrl+C to stop.");
        self.run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Poll on every tick until `shutdown` resolves. The shutdown future is
    /// raced against the whole tick, so an in-flight poll is abandoned.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.cfg.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    self.shutdown();
                    return Ok(());
                }
                _ = self.tick(&mut ticker) => {}
            }
        }
    }

    async fn tick(&mut self, ticker: &mut Interval) {
        ticker.tick().await;
        match self.poller.poll().await {
            Ok(signals) => {
                for signal in &signals {
                    self.show(signal);
                }
            }
            Err(e) => {
                self.failed_polls += 1;
                warn!("Signal poll failed: {:#}", e);
            }
        }
    }

    fn show(&mut self, signal: &TradeSignal) {
        match self.cfg.output {
            OutputStyle::Line => {
                println!("[{}] {}", signal.symbol, render_signal_line(signal));
                self.shown += 1;
            }
            OutputStyle::Telegram => {
                match format_telegram_message(signal, self.cfg.display_timezone) {
                    Ok(msg) => {
                        println!("{msg}\n");
                        self.shown += 1;
                    }
                    Err(e) => {
                        self.rejected += 1;
                        warn!("Skipping signal {}: {}", signal.id, e);
                    }
                }
            }
        }
    }

    fn shutdown(&self) {
        info!("{}", "=".repeat(60));
        info!("Shutting down");
        info!(
            "Shown: {} | Rejected: {} | Failed polls: {}",
            self.shown, self.rejected, self.failed_polls
        );
        info!("{}", "=".repeat(60));
    }
}
