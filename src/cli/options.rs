use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::PresenceSpec;

/// Command line interface for the cask provider
#[derive(Parser, Debug)]
#[command(name = "rustle-cask")]
#[command(about = "Reconcile Homebrew Cask packages against a desired state")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct RustleCaskCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Package manager executable, overrides the configuration file
    #[arg(long, global = true)]
    pub program: Option<PathBuf>,

    /// Installation root, skips discovery through the tool
    #[arg(long, global = true)]
    pub install_root: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether a package is installed
    Installed { name: String },

    /// Show the installed version of a package
    Query { name: String },

    /// Show the best available version of a package
    Latest { name: String },

    /// Install a package, optionally at a pinned version
    Install {
        name: String,
        /// Version to install
        #[arg(long)]
        version: Option<String>,
        /// Option passed verbatim to the install command (repeatable)
        #[arg(long = "install-option", allow_hyphen_values = true)]
        install_options: Vec<String>,
    },

    /// Remove a package
    Uninstall { name: String },

    /// List installed packages
    List { name: Option<String> },

    /// Bring one package to the desired state
    Ensure {
        name: String,
        /// absent, present, installed, latest or a version
        #[arg(long, default_value = "present")]
        ensure: PresenceSpec,
        /// Option passed verbatim to the install command (repeatable)
        #[arg(long = "install-option", allow_hyphen_values = true)]
        install_options: Vec<String>,
        /// Report what would change without changing it
        #[arg(long)]
        check: bool,
    },

    /// Reconcile every resource in a YAML file
    Apply {
        file: PathBuf,
        /// Report what would change without changing it
        #[arg(long)]
        check: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
