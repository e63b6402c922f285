//! dwm status line daemon.
//!
//! Samples network throughput, battery, volume and the clock on a fixed
//! interval and publishes the joined line as the X root window name.

use anyhow::Result;
use dwmstatus_common::{Shutdown, StatusArgs, init_tracing};

use dwmstatus::config::StatusConfig;
use dwmstatus::scheduler::Scheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = StatusArgs::parse();

    // Load configuration (built-in defaults when no file exists)
    let mut config = StatusConfig::resolve(args.config.as_deref())?;

    // CLI log level wins over the config file
    if let Some(level) = args.log_level.clone() {
        config.logging.level = level;
    }
    init_tracing(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        counter_path = %config.status.counter_path.display(),
        interval_secs = config.status.tick_interval_secs,
        "Starting dwmstatus"
    );

    let mut scheduler = Scheduler::from_settings(&config.status);

    if args.once {
        scheduler.run_once().await;
        return Ok(());
    }

    // Register SIGTERM before the first tick
    let mut shutdown = Shutdown::install()?;

    // Run until Ctrl+C or SIGTERM
    tokio::select! {
        _ = scheduler.run() => {}
        signal = shutdown.wait() => {
            tracing::info!(signal, "Received shutdown signal");
        }
    }

    Ok(())
}
