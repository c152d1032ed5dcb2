//! Install a package at the desired state

use tracing::{debug, info};

use crate::provider::{CaskError, PackageManagerClient};
use crate::runner::CommandRunner;
use crate::types::PackageResource;

impl<R: CommandRunner> PackageManagerClient<R> {
    /// Run the install command for `resource`.
    ///
    /// The tool can exit 0 while printing the no-available marker, so the
    /// marker is checked before the exit status. Callers are expected to
    /// have checked that an install is needed.
    pub async fn install(&self, resource: &PackageResource) -> Result<(), CaskError> {
        resource.validate()?;
        let name = resource.name.as_str();
        let identifier = self.identifier(resource);
        info!(package = name, %identifier, "Installing");

        let args = std::iter::once(self.config().verbs.install.clone())
            .chain(std::iter::once(identifier))
            .chain(resource.install_options.iter().cloned());
        let command = self.config().mutating_command(args);

        let outcome = self
            .runner()
            .run(&command)
            .await
            .map_err(|err| CaskError::install_failed(name, err))?;

        if outcome
            .combined()
            .contains(self.config().markers.no_available.as_str())
        {
            return Err(CaskError::PackageNotFound {
                package: name.to_string(),
            });
        }

        outcome
            .into_stdout(&command)
            .map_err(|err| CaskError::install_failed(name, err))?;

        debug!(package = name, "Install command completed");
        Ok(())
    }
}
