//! Execution of the external package manager
//!
//! The runner only launches processes and captures what they print. Whether
//! a given output means success is decided by the caller, because the tool
//! reports some failures on stdout while exiting 0.

pub mod error;
pub mod system;

pub use error::RunnerError;
pub use system::SystemCommandRunner;

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RunAs;

/// A fully specified invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Re-launch this command through `sudo -E -u <user>` with HOME pointing
    /// at the user's home directory
    pub fn run_as(self, run_as: &RunAs) -> Self {
        let mut args = vec![
            "-E".to_string(),
            "-u".to_string(),
            run_as.user.clone(),
            self.program.display().to_string(),
        ];
        args.extend(self.args);

        let mut env = self.env;
        env.retain(|(key, _)| key != "HOME");
        env.push(("HOME".to_string(), run_as.home.display().to_string()));

        Self {
            program: run_as.sudo.clone(),
            args,
            env,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.display().to_string());
        words.extend(self.args.iter().cloned());
        f.write_str(&shell_words::join(words))
    }
}

/// What a finished process left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub succeeded: bool,
    /// Stderr plus exit status, for error messages
    pub diagnostic: String,
    pub exit_code: Option<i32>,
}

impl ExecutionOutcome {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            succeeded: true,
            diagnostic: String::new(),
            exit_code: Some(0),
        }
    }

    pub fn failure(exit_code: i32, diagnostic: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            succeeded: false,
            diagnostic: diagnostic.into(),
            exit_code: Some(exit_code),
        }
    }

    /// Stdout and diagnostic together, as a terminal would have shown them
    pub fn combined(&self) -> String {
        if self.diagnostic.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.diagnostic)
        }
    }

    /// Turn a non-zero exit into an error, keeping stdout on success
    pub fn into_stdout(self, command: &CommandLine) -> Result<String, RunnerError> {
        if self.succeeded {
            Ok(self.stdout)
        } else {
            Err(RunnerError::Failed {
                command: command.to_string(),
                exit_code: self.exit_code,
                diagnostic: self.diagnostic,
            })
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion. Errors only when the process could
    /// not be started; a non-zero exit is reported in the outcome.
    async fn run(&self, command: &CommandLine) -> Result<ExecutionOutcome, RunnerError>;
}
