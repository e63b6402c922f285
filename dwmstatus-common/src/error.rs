use thiserror::Error;

/// Common error type for dwmstatus components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' timed out after {secs}s")]
    Timeout { command: String, secs: u64 },
}

/// Result type alias using dwmstatus's Error.
pub type Result<T> = std::result::Result<T, Error>;
