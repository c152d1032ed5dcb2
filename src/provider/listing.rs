//! Enumerate installed packages

use tracing::{debug, warn};

use crate::parser::parse_listing_line;
use crate::provider::{CaskError, PackageManagerClient};
use crate::runner::CommandRunner;
use crate::types::{validate_name, QueryResult};

impl<R: CommandRunner> PackageManagerClient<R> {
    /// Installed packages in output order. With a filter, at most the first
    /// entry carrying that name. The installation root is looked up only
    /// when the listing prints paths.
    pub async fn package_list(&self, filter: Option<&str>) -> Result<Vec<QueryResult>, CaskError> {
        debug!(filter, "Listing installed packages");

        let mut args = vec![self.config().verbs.list.clone()];
        if let Some(name) = filter {
            validate_name(name)?;
            args.push(name.to_string());
        }

        let command = self.config().command(args);
        let stdout = self
            .execute(&command)
            .await
            .map_err(CaskError::listing_failed)?;

        // Only path lines need the root; `<name> <version>` output never does
        let root = if stdout.lines().any(|line| line.starts_with('/')) {
            Some(
                self.install_root()
                    .await
                    .map_err(CaskError::listing_failed)?,
            )
        } else {
            None
        };

        let provider = self.provider_id();
        let mut entries = stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let parsed = parse_listing_line(line, root.as_deref());
                if parsed.is_none() {
                    warn!(line, "Could not parse listing line");
                }
                parsed
            })
            .map(|entry| QueryResult {
                name: entry.name.to_string(),
                version: entry.version.to_string(),
                source_provider: provider.clone(),
            });

        let list = match filter {
            Some(name) => entries.find(|entry| entry.name == name).into_iter().collect(),
            None => entries.collect(),
        };
        Ok(list)
    }
}
