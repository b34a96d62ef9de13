use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::process::Command;

use crate::errors::ToolError;
use crate::utils;

/// Captured result of a finished external tool
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,

    /// Standard output from the tool
    pub stdout: String,

    /// Standard error from the tool
    pub stderr: String,

    /// Time taken to execute the tool
    pub execution_time: Duration,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external tools with a time bound
#[derive(Debug, Clone, Copy)]
pub struct ToolExecutor {
    timeout: Duration,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `command` to completion or until the timeout elapses.
    ///
    /// A non-zero exit code is returned as output, not as an error: analyzers
    /// decide what it means. On timeout, or if the returned future is dropped,
    /// the child process is killed.
    pub async fn run(&self, name: &str, mut command: Command) -> Result<ToolOutput, ToolError> {
        utils::log_command(command.as_std());

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolError::NotFound(name.to_string()),
            _ => ToolError::ExecutionFailed {
                name: name.to_string(),
                message: e.to_string(),
            },
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ToolError::ExecutionFailed {
                    name: name.to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                warn!("{} timed out after {:?}", name, self.timeout);
                return Err(ToolError::Timeout {
                    name: name.to_string(),
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let result = ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            execution_time: start.elapsed(),
        };

        debug!(
            "Tool {} finished in {:?} with exit code {:?}",
            name, result.execution_time, result.exit_code
        );

        Ok(result)
    }
}
