//! Destinations for the finished status line.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use dwmstatus_common::shell;
use tracing::warn;

/// Receives the status line as the window manager's display title.
#[async_trait]
pub trait TitleSink: Send + Sync {
    /// Fire-and-forget: failures are logged by the implementation.
    async fn set_title(&self, line: &str);
}

/// Line-oriented text output.
pub trait LineSink: Send {
    fn write_line(&mut self, line: &str);
}

/// Sets the X root window name, which dwm shows as its status text.
#[derive(Debug, Clone)]
pub struct XsetrootTitle {
    timeout: Duration,
}

impl XsetrootTitle {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl TitleSink for XsetrootTitle {
    async fn set_title(&self, line: &str) {
        match shell::exec_args("xsetroot", &["-name", line], self.timeout).await {
            Ok(result) if !result.success() => {
                warn!(
                    exit_code = result.exit_code,
                    stderr = %result.stderr,
                    "xsetroot failed"
                );
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Failed to set root window name"),
        }
    }
}

/// Title sink used when title publishing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTitle;

#[async_trait]
impl TitleSink for NoTitle {
    async fn set_title(&self, _line: &str) {}
}

/// Writes each line to stdout and flushes it.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to write status line to stdout");
        }
    }
}
