//! Rustle Cask - desired-state package provider for Homebrew Cask
//!
//! This crate reconciles package resources (absent, present, a pinned
//! version, or latest) against a host whose state is only observable through
//! the `brew` command line. Installed versions and available releases are
//! recovered from the tool's text output; installs and removals are driven
//! through the same tool.

pub mod cli;
pub mod config;
pub mod parser;
pub mod provider;
pub mod reconcile;
pub mod runner;
pub mod types;

pub use config::ToolConfig;
pub use provider::{BestEffort, CaskError, PackageManagerClient, PackageProvider, SkippedStep};
pub use reconcile::{Action, CurrentState, ReconcileReport, Reconciler};
pub use runner::{CommandLine, CommandRunner, ExecutionOutcome, SystemCommandRunner};
pub use types::*;
