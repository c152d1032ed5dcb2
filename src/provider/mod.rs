//! Package provider for the external package manager
//!
//! [`PackageManagerClient`] is the single implementation of the provider
//! capability. Tool specifics (commands, markers, identifier rule) come
//! from the injected [`ToolConfig`](crate::config::ToolConfig).

pub mod client;
pub mod error;
pub mod installer;
pub mod latest;
pub mod listing;
pub mod state_query;
pub mod uninstaller;

pub use client::PackageManagerClient;
pub use error::{BestEffort, CaskError, SkippedStep};

use async_trait::async_trait;

use crate::runner::CommandRunner;
use crate::types::{PackageResource, QueryResult, VersionToken};

/// What the reconciler needs from a package manager
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageProvider: Send + Sync {
    /// Identifier passed to the install command for this resource
    fn identifier(&self, resource: &PackageResource) -> String;

    async fn installed(&self, name: &str) -> Result<bool, CaskError>;

    async fn query(&self, name: &str) -> Result<Option<QueryResult>, CaskError>;

    async fn latest(&self, name: &str) -> BestEffort<Option<VersionToken>>;

    async fn install(&self, resource: &PackageResource) -> Result<(), CaskError>;

    async fn uninstall(&self, name: &str) -> BestEffort<()>;
}

#[async_trait]
impl<R: CommandRunner> PackageProvider for PackageManagerClient<R> {
    fn identifier(&self, resource: &PackageResource) -> String {
        PackageManagerClient::identifier(self, resource)
    }

    async fn installed(&self, name: &str) -> Result<bool, CaskError> {
        PackageManagerClient::installed(self, name).await
    }

    async fn query(&self, name: &str) -> Result<Option<QueryResult>, CaskError> {
        PackageManagerClient::query(self, name).await
    }

    async fn latest(&self, name: &str) -> BestEffort<Option<VersionToken>> {
        PackageManagerClient::latest(self, name).await
    }

    async fn install(&self, resource: &PackageResource) -> Result<(), CaskError> {
        PackageManagerClient::install(self, resource).await
    }

    async fn uninstall(&self, name: &str) -> BestEffort<()> {
        PackageManagerClient::uninstall(self, name).await
    }
}
