//! Shell command execution for the external status collaborators.
//!
//! Battery, volume and title updates are obtained by running small shell
//! pipelines (`acpi`, `amixer`, `xsetroot`). Every invocation is bounded by a
//! timeout so a hanging command can only stall a tick, never the daemon.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use dwmstatus_common::shell;
//!
//! let result = shell::exec("acpi -b", Duration::from_secs(2)).await?;
//! if result.success() {
//!     println!("battery: {}", result.stdout);
//! }
//! ```

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::{Error, Result};

/// Result of a shell command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// The exit code of the command (0 = success, -1 if killed by a signal).
    pub exit_code: i32,
    /// Captured stdout, with trailing newlines removed.
    pub stdout: String,
    /// Captured stderr, trimmed.
    pub stderr: String,
}

impl ExecResult {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes a pipeline through `/bin/sh -c` with a timeout.
///
/// The child is killed if the timeout elapses. A non-zero exit is not an
/// error here: callers decide what a failing exit code means.
pub async fn exec(cmd: &str, timeout: Duration) -> Result<ExecResult> {
    let mut command = Command::new("/bin/sh");
    command.arg("-c").arg(cmd);
    run(command, cmd, timeout).await
}

/// Executes a program directly with the given arguments and a timeout.
///
/// Used where an argument must be passed verbatim without shell quoting,
/// e.g. the status line handed to `xsetroot -name`.
pub async fn exec_args(program: &str, args: &[&str], timeout: Duration) -> Result<ExecResult> {
    let mut command = Command::new(program);
    command.args(args);
    run(command, program, timeout).await
}

async fn run(mut command: Command, label: &str, timeout: Duration) -> Result<ExecResult> {
    tracing::trace!(command = %label, "Executing command");

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command.spawn().map_err(|e| Error::Spawn {
        command: label.to_string(),
        source: e,
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output?,
        Err(_) => {
            return Err(Error::Timeout {
                command: label.to_string(),
                secs: timeout.as_secs(),
            });
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\n', '\r'])
        .to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    let result = ExecResult {
        exit_code,
        stdout,
        stderr,
    };

    if result.success() {
        tracing::trace!(command = %label, "Command succeeded");
    } else {
        tracing::debug!(
            command = %label,
            exit_code = exit_code,
            stderr = %result.stderr,
            "Command exited non-zero"
        );
    }

    Ok(result)
}
