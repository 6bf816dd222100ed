//! NDL Lite - Nags 'N' Dogs Lite Bot
//!
//! Terminal front-end shell for the sports-trading bot, driven by a
//! mock account and connection feed.

use ndl_lite::{App, Config, Result, config, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to the UI, so logs go to a daily file
    let log_dir = config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;
    let (log_writer, _log_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "ndl-lite.log"));

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ndl_lite=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_writer),
        )
        .init();
    error::install_panic_hook();

    // Load configuration
    let config = Config::load_or_default()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting NDL Lite");

    // Run the application
    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}
