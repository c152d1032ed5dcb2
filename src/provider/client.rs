//! Shared plumbing for the provider operations

use tracing::debug;

use crate::config::ToolConfig;
use crate::runner::{CommandLine, CommandRunner, RunnerError, SystemCommandRunner};
use crate::types::{PackageResource, ProviderId};

/// Drives one package manager through its command line.
///
/// Holds no state besides configuration; every call reads the host afresh.
#[derive(Debug, Clone)]
pub struct PackageManagerClient<R = SystemCommandRunner> {
    config: ToolConfig,
    runner: R,
}

impl PackageManagerClient<SystemCommandRunner> {
    pub fn system(config: ToolConfig) -> Self {
        Self::new(config, SystemCommandRunner::new())
    }
}

impl<R: CommandRunner> PackageManagerClient<R> {
    pub fn new(config: ToolConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn provider_id(&self) -> ProviderId {
        self.config.provider_id()
    }

    /// `name-version` for pinned versions, the bare name otherwise
    pub fn identifier(&self, resource: &PackageResource) -> String {
        self.config
            .identifier
            .identifier(&resource.name, resource.ensure.version())
    }

    /// Run a command and require a zero exit status
    pub(crate) async fn execute(&self, command: &CommandLine) -> Result<String, RunnerError> {
        self.runner.run(command).await?.into_stdout(command)
    }

    /// Installation root used as the line prefix for cellar paths.
    ///
    /// A configured root wins; otherwise the bare tool invocation prints it.
    /// Nothing is cached between calls.
    pub(crate) async fn install_root(&self) -> Result<String, RunnerError> {
        if let Some(root) = &self.config.install_root {
            return Ok(root.display().to_string());
        }

        let command = self.config.command(Vec::<String>::new());
        let stdout = self.execute(&command).await?;
        let root = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| RunnerError::UnexpectedOutput {
                command: command.to_string(),
                reason: "no installation root printed".to_string(),
            })?;

        debug!(root, "Discovered installation root");
        Ok(root.to_string())
    }
}
