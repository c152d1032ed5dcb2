//! Remove a package, best effort

use tracing::{error, info};

use crate::provider::{BestEffort, PackageManagerClient, SkippedStep};
use crate::runner::CommandRunner;
use crate::types::validate_name;

impl<R: CommandRunner> PackageManagerClient<R> {
    /// A failed removal leaves exactly one log entry, at error level, and is
    /// handed back as [`SkippedStep`] for the caller to ignore or report.
    pub async fn uninstall(&self, name: &str) -> BestEffort<()> {
        let skipped = |diagnostic: String| SkippedStep {
            operation: "uninstall",
            package: name.to_string(),
            diagnostic,
        };

        if let Err(err) = validate_name(name) {
            error!(package = name, error = %err, "Uninstall failed");
            return Err(skipped(err.to_string()));
        }

        let command = self
            .config()
            .mutating_command([self.config().verbs.uninstall.as_str(), name]);
        match self.execute(&command).await {
            Ok(_) => {
                info!(package = name, "Uninstalled");
                Ok(())
            }
            Err(err) => {
                let diagnostic = err.diagnostic();
                error!(package = name, %diagnostic, "Uninstall failed");
                Err(skipped(diagnostic))
            }
        }
    }
}
