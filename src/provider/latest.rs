//! Best available version, resolved from the info text

use tracing::{debug, warn};

use crate::parser::latest_from_info;
use crate::provider::{BestEffort, PackageManagerClient, SkippedStep};
use crate::runner::CommandRunner;
use crate::types::{validate_name, VersionToken};

impl<R: CommandRunner> PackageManagerClient<R> {
    /// `Ok(None)` when no info line names a version. A failed command is
    /// returned as [`SkippedStep`] and logged below error level.
    pub async fn latest(&self, name: &str) -> BestEffort<Option<VersionToken>> {
        let skipped = |diagnostic: String| SkippedStep {
            operation: "latest",
            package: name.to_string(),
            diagnostic,
        };

        validate_name(name).map_err(|err| skipped(err.to_string()))?;
        debug!(package = name, "Querying latest version");

        let command = self.config().command([self.config().verbs.info.as_str(), name]);
        let stdout = match self.execute(&command).await {
            Ok(stdout) => stdout,
            Err(err) => {
                warn!(package = name, error = %err, "Could not resolve latest version");
                return Err(skipped(err.diagnostic()));
            }
        };

        match latest_from_info(&stdout, name) {
            Some(found) => {
                debug!(
                    package = name,
                    version = found.version,
                    rule = ?found.rule,
                    "Resolved latest version"
                );
                Ok(Some(found.version.to_string()))
            }
            None => {
                debug!(package = name, "No version line in info output");
                Ok(None)
            }
        }
    }
}
