//! Is the package installed, and at which version

use tracing::debug;

use crate::parser::{cellar_version, starts_with_root};
use crate::provider::{CaskError, PackageManagerClient};
use crate::runner::CommandRunner;
use crate::types::{validate_name, QueryResult};

impl<R: CommandRunner> PackageManagerClient<R> {
    /// False only when the info output carries the not-installed line
    pub async fn installed(&self, name: &str) -> Result<bool, CaskError> {
        validate_name(name)?;

        let command = self.config().command([self.config().verbs.info.as_str(), name]);
        let stdout = self
            .execute(&command)
            .await
            .map_err(|err| CaskError::query_failed(name, err))?;

        let marker = self.config().markers.not_installed.as_str();
        let installed = !stdout.lines().any(|line| line == marker);
        debug!(package = name, installed, "Checked installation");
        Ok(installed)
    }

    /// Installed version, read from the first info line under the
    /// installation root. `None` when no such line exists.
    pub async fn query(&self, name: &str) -> Result<Option<QueryResult>, CaskError> {
        validate_name(name)?;
        debug!(package = name, "Querying");

        let root = self
            .install_root()
            .await
            .map_err(|err| CaskError::query_failed(name, err))?;

        let command = self.config().command([self.config().verbs.info.as_str(), name]);
        let stdout = self
            .execute(&command)
            .await
            .map_err(|err| CaskError::query_failed(name, err))?;

        let Some(line) = stdout.lines().find(|line| starts_with_root(line, &root)) else {
            debug!(package = name, root = %root, "No installation found");
            return Ok(None);
        };

        let Some(version) = cellar_version(line, &root) else {
            debug!(package = name, line, "Installation line carries no version");
            return Ok(None);
        };

        debug!(package = name, version, line, "Found installed version");
        Ok(Some(QueryResult {
            name: name.to_string(),
            version: version.to_string(),
            source_provider: self.provider_id(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;
    use crate::runner::{ExecutionOutcome, MockCommandRunner};
    use std::path::PathBuf;

    const FIREFOX_INFO: &str = "\
firefox: 89.0.2 (auto_updates)
https://www.mozilla.org/firefox/
/usr/local/Caskroom/firefox/89.0.2 (123B)
From: https://github.com/Homebrew/homebrew-cask/blob/HEAD/Casks/firefox.rb
";

    fn with_root() -> ToolConfig {
        ToolConfig {
            install_root: Some(PathBuf::from("/usr/local/Caskroom")),
            ..ToolConfig::default()
        }
    }

    #[tokio::test]
    async fn test_installed_false_on_marker_line() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|c| c.args == ["cask", "info", "firefox"])
            .times(1)
            .returning(|_| Ok(ExecutionOutcome::success("firefox: 89.0\nNot installed\n")));

        let client = PackageManagerClient::new(ToolConfig::default(), runner);
        assert!(!client.installed("firefox").await.unwrap());
    }

    #[tokio::test]
    async fn test_installed_ignores_marker_inside_line() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(ExecutionOutcome::success("Caveats: Not installed by default\n")));

        let client = PackageManagerClient::new(ToolConfig::default(), runner);
        assert!(client.installed("firefox").await.unwrap());
    }

    #[tokio::test]
    async fn test_query_extracts_version() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_| Ok(ExecutionOutcome::success(FIREFOX_INFO)));

        let client = PackageManagerClient::new(with_root(), runner);
        let result = client.query("firefox").await.unwrap().unwrap();
        assert_eq!(result.name, "firefox");
        assert_eq!(result.version, "89.0.2");
        assert_eq!(result.source_provider.as_str(), "cask");
    }

    #[tokio::test]
    async fn test_query_discovers_root_with_bare_invocation() {
        let mut runner = MockCommandRunner::new();
        let mut seq = mockall::Sequence::new();
        runner
            .expect_run()
            .withf(|c| c.args == ["cask"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ExecutionOutcome::success("/usr/local/Caskroom\n")));
        runner
            .expect_run()
            .withf(|c| c.args == ["cask", "info", "firefox"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ExecutionOutcome::success(FIREFOX_INFO)));

        let client = PackageManagerClient::new(ToolConfig::default(), runner);
        let result = client.query("firefox").await.unwrap().unwrap();
        assert_eq!(result.version, "89.0.2");
    }

    #[tokio::test]
    async fn test_query_wraps_execution_failure() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(ExecutionOutcome::failure(1, "Error: Cask 'nope' is unavailable")));

        let client = PackageManagerClient::new(with_root(), runner);
        match client.query("nope").await {
            Err(CaskError::QueryFailed {
                package,
                diagnostic,
            }) => {
                assert_eq!(package, "nope");
                assert!(diagnostic.contains("is unavailable"));
            }
            other => panic!("expected QueryFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_rejects_empty_name() {
        let client = PackageManagerClient::new(with_root(), MockCommandRunner::new());
        assert!(matches!(
            client.query("").await,
            Err(CaskError::InvalidResource { .. })
        ));
    }
}
