//! dwmstatus Common Library
//!
//! This crate provides the shared plumbing for the dwmstatus daemon:
//!
//! - [`config`] - Configuration loading (JSON5 format) and logging settings
//! - [`args`] - Command-line arguments
//! - [`shell`] - Bounded execution of external status commands
//! - [`signal`] - Ctrl+C / SIGTERM shutdown
//! - [`error`] - Error types

pub mod args;
pub mod config;
pub mod error;
pub mod shell;
pub mod signal;

// Re-export commonly used types at the crate root
pub use args::StatusArgs;
pub use config::{LogFormat, LoggingConfig, default_config_path, load_config, parse_config};
pub use error::{Error, Result};
pub use shell::{ExecResult, exec, exec_args};
pub use signal::Shutdown;

/// Initialize tracing with the given configuration.
///
/// Logs are written to stderr; stdout is reserved for status lines.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
