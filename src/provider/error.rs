use serde::Serialize;
use thiserror::Error;

use crate::runner::RunnerError;

/// Failures that stop reconciliation of a resource
#[derive(Error, Debug)]
pub enum CaskError {
    #[error("Invalid package resource: {reason}")]
    InvalidResource { reason: String },

    #[error("Query failed for {package}: {diagnostic}")]
    QueryFailed { package: String, diagnostic: String },

    #[error("Could not find cask package {package}")]
    PackageNotFound { package: String },

    #[error("Installation failed for {package}: {diagnostic}")]
    InstallFailed { package: String, diagnostic: String },

    #[error("Could not list packages: {diagnostic}")]
    ListingFailed { diagnostic: String },
}

impl CaskError {
    pub(crate) fn query_failed(package: &str, err: RunnerError) -> Self {
        CaskError::QueryFailed {
            package: package.to_string(),
            diagnostic: err.diagnostic(),
        }
    }

    pub(crate) fn install_failed(package: &str, err: RunnerError) -> Self {
        CaskError::InstallFailed {
            package: package.to_string(),
            diagnostic: err.diagnostic(),
        }
    }

    pub(crate) fn listing_failed(err: RunnerError) -> Self {
        CaskError::ListingFailed {
            diagnostic: err.diagnostic(),
        }
    }
}

/// A best-effort step that did not complete.
///
/// There is no conversion into [`CaskError`]: callers decide explicitly
/// whether to ignore it, so `?` cannot turn it into a hard failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{operation} of {package} did not complete: {diagnostic}")]
pub struct SkippedStep {
    pub operation: &'static str,
    pub package: String,
    pub diagnostic: String,
}

pub type BestEffort<T> = Result<T, SkippedStep>;
