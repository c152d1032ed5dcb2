use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::cli::options::{Commands, OutputFormat, RustleCaskCli};
use crate::cli::output::{
    print_installed, print_latest, print_list, print_outcomes, print_query, print_report,
    print_skipped,
};
use crate::config::ToolConfig;
use crate::provider::PackageManagerClient;
use crate::reconcile::Reconciler;
use crate::runner::CommandRunner;
use crate::types::{PackageResource, PresenceSpec};

/// Layer CLI overrides on top of the configuration file and resolve it once
pub fn build_config(cli: &RustleCaskCli) -> Result<ToolConfig> {
    let mut config = ToolConfig::discover(cli.config.as_deref())?;

    if let Some(program) = &cli.program {
        config.program = program.clone();
    }
    if let Some(root) = &cli.install_root {
        config.install_root = Some(root.clone());
    }

    let config = config.resolve()?;
    debug!(?config, "Effective configuration");
    Ok(config)
}

/// Read a YAML list of package resources
pub fn load_resources(path: &Path) -> Result<Vec<PackageResource>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read resources from {}", path.display()))?;
    let resources: Vec<PackageResource> = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse resources in {}", path.display()))?;
    Ok(resources)
}

/// Dispatch one CLI command. Returns false when the command failed in a way
/// that should set a non-zero exit status without aborting with an error.
pub async fn run_command<R: CommandRunner>(
    command: Commands,
    reconciler: &Reconciler<PackageManagerClient<R>>,
    format: OutputFormat,
) -> Result<bool> {
    let client = reconciler.provider();

    match command {
        Commands::Installed { name } => {
            let installed = client.installed(&name).await?;
            print_installed(&name, installed, format)?;
        }
        Commands::Query { name } => {
            let result = client.query(&name).await?;
            print_query(&name, result.as_ref(), format)?;
        }
        Commands::Latest { name } => {
            let latest = client.latest(&name).await;
            print_latest(
                &name,
                latest.as_ref().map(|found| found.as_deref()),
                format,
            )?;
        }
        Commands::Install {
            name,
            version,
            install_options,
        } => {
            let ensure = version.map_or(PresenceSpec::Present, PresenceSpec::Version);
            let resource = PackageResource::new(name, ensure).with_install_options(install_options);
            client.install(&resource).await?;
            info!(package = %resource.name, "Install finished");
        }
        Commands::Uninstall { name } => {
            if let Err(step) = client.uninstall(&name).await {
                print_skipped(&step, format)?;
            }
        }
        Commands::List { name } => {
            let list = client.package_list(name.as_deref()).await?;
            print_list(&list, format)?;
        }
        Commands::Ensure {
            name,
            ensure,
            install_options,
            check,
        } => {
            let resource = PackageResource::new(name, ensure).with_install_options(install_options);
            let report = reconciler.ensure(&resource, check).await?;
            print_report(&report, format)?;
        }
        Commands::Apply { file, check } => {
            let resources = load_resources(&file)?;
            info!(count = resources.len(), file = %file.display(), "Applying resources");
            let outcomes = reconciler.apply(&resources, check).await;
            let failed = print_outcomes(&outcomes, format)?;
            return Ok(failed == 0);
        }
    }

    Ok(true)
}

/// Entry point used by the binary
pub async fn run(cli: RustleCaskCli) -> Result<bool> {
    let config = build_config(&cli)?;
    let reconciler = Reconciler::new(PackageManagerClient::system(config));
    run_command(cli.command, &reconciler, cli.format).await
}
