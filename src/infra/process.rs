//! Thin wrapper over child processes. A non-zero exit is a normal result;
//! only a failure to launch the program is an error.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Best human-readable reason for a failed command.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exited with status {}", self.exit_code)
        } else {
            stderr.to_string()
        }
    }
}

/// Runs `program` with captured stdout/stderr.
#[instrument(skip(args), fields(args = ?args))]
pub async fn run(program: &str, args: &[&str]) -> AppResult<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|err| launch_error(program, err))?;

    let result = CommandOutput {
        exit_code: exit_code(output.status),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(exit_code = result.exit_code, "command finished");
    Ok(result)
}

/// Runs `program` with the terminal's stdout/stderr so the user sees its own
/// progress output. Returns the exit code.
#[instrument(skip(args), fields(args = ?args))]
pub async fn run_attached(program: &str, args: &[&str]) -> AppResult<i32> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|err| launch_error(program, err))?;

    let code = exit_code(status);
    debug!(exit_code = code, "command finished");
    Ok(code)
}

// Killed by a signal counts as a generic failure.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

fn launch_error(program: &str, err: std::io::Error) -> AppError {
    AppError::VersionControl(format!("failed to launch `{program}`: {err}"))
}
