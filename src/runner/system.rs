//! Runner backed by real child processes

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::runner::{CommandLine, CommandRunner, ExecutionOutcome, RunnerError};

/// Launches commands with tokio and waits for them without a timeout
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &CommandLine) -> Result<ExecutionOutcome, RunnerError> {
        debug!(command = %command, "Executing");

        let output = Command::new(&command.program)
            .args(&command.args)
            .envs(command.env.iter().map(|(key, value)| (key, value)))
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code();
        trace!(?exit_code, %stdout, %stderr, "Command finished");

        let diagnostic = if output.status.success() {
            stderr
        } else {
            match exit_code {
                Some(code) => format!("exit status {code}: {}", stderr.trim_end()),
                None => format!("terminated by signal: {}", stderr.trim_end()),
            }
        };

        Ok(ExecutionOutcome {
            stdout,
            succeeded: output.status.success(),
            diagnostic,
            exit_code,
        })
    }
}
