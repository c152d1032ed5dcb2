//! Desired-state reconciliation
//!
//! Works against any [`PackageProvider`]: establish the current state,
//! decide on one action, run it (unless in check mode) and report.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::provider::{CaskError, PackageProvider, SkippedStep};
use crate::types::{PackageResource, PresenceSpec, VersionToken};

/// What is on the host before any action is taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CurrentState {
    NotInstalled,
    /// `version` is unknown when the tool reports the package as installed
    /// but prints no installation line
    Installed { version: Option<VersionToken> },
}

impl CurrentState {
    pub fn is_installed(&self) -> bool {
        matches!(self, CurrentState::Installed { .. })
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            CurrentState::Installed { version } => version.as_deref(),
            CurrentState::NotInstalled => None,
        }
    }
}

impl fmt::Display for CurrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentState::NotInstalled => f.write_str("not installed"),
            CurrentState::Installed { version: Some(v) } => write!(f, "installed ({v})"),
            CurrentState::Installed { version: None } => f.write_str("installed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    None,
    Install { identifier: String },
    Uninstall,
}

/// Result of reconciling one resource
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub name: String,
    pub desired: PresenceSpec,
    pub before: CurrentState,
    pub action: Action,
    pub changed: bool,
    pub check_mode: bool,
    /// Best-effort steps that did not complete
    pub skipped: Vec<SkippedStep>,
    pub msg: String,
}

/// One entry of a batch run
#[derive(Debug)]
pub struct ResourceOutcome {
    pub name: String,
    pub result: Result<ReconcileReport, CaskError>,
}

struct Plan {
    before: CurrentState,
    action: Action,
    skipped: Vec<SkippedStep>,
}

pub struct Reconciler<P> {
    provider: P,
}

impl<P: PackageProvider> Reconciler<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn current_state(&self, name: &str) -> Result<CurrentState, CaskError> {
        if !self.provider.installed(name).await? {
            return Ok(CurrentState::NotInstalled);
        }
        let version = self.provider.query(name).await?.map(|result| result.version);
        Ok(CurrentState::Installed { version })
    }

    async fn plan(&self, resource: &PackageResource) -> Result<Plan, CaskError> {
        let name = resource.name.as_str();
        let before = self.current_state(name).await?;
        let mut skipped = Vec::new();
        let install = || Action::Install {
            identifier: self.provider.identifier(resource),
        };

        let action = match (&resource.ensure, &before) {
            (PresenceSpec::Absent, CurrentState::Installed { .. }) => Action::Uninstall,
            (PresenceSpec::Absent, CurrentState::NotInstalled) => Action::None,
            (_, CurrentState::NotInstalled) => install(),
            (PresenceSpec::Present, CurrentState::Installed { .. }) => Action::None,
            (PresenceSpec::Version(wanted), CurrentState::Installed { version }) => {
                if version.as_deref() == Some(wanted.as_str()) {
                    Action::None
                } else {
                    install()
                }
            }
            (PresenceSpec::Latest, CurrentState::Installed { version }) => {
                match self.provider.latest(name).await {
                    Ok(Some(latest)) if version.as_deref() != Some(latest.as_str()) => {
                        debug!(package = name, %latest, "Newer version available");
                        install()
                    }
                    Ok(_) => Action::None,
                    Err(step) => {
                        skipped.push(step);
                        Action::None
                    }
                }
            }
        };

        Ok(Plan {
            before,
            action,
            skipped,
        })
    }

    /// Bring one resource to its desired state.
    ///
    /// Query and install failures are returned; an uninstall that does not
    /// complete is recorded in [`ReconcileReport::skipped`] instead.
    pub async fn ensure(
        &self,
        resource: &PackageResource,
        check_mode: bool,
    ) -> Result<ReconcileReport, CaskError> {
        resource.validate()?;
        let name = resource.name.clone();
        let Plan {
            before,
            action,
            mut skipped,
        } = self.plan(resource).await?;

        let report = |changed: bool, skipped: Vec<SkippedStep>, msg: String| ReconcileReport {
            name: name.clone(),
            desired: resource.ensure.clone(),
            before: before.clone(),
            action: action.clone(),
            changed,
            check_mode,
            skipped,
            msg,
        };

        match &action {
            Action::None => Ok(report(
                false,
                skipped,
                format!("Package {name} is already {}", resource.ensure),
            )),
            _ if check_mode => Ok(report(
                true,
                skipped,
                format!("Package {name} would be {}", resource.ensure),
            )),
            Action::Install { identifier } => {
                self.provider.install(resource).await?;
                info!(package = %name, %identifier, "Package installed");
                Ok(report(true, skipped, format!("Package {name} installed")))
            }
            Action::Uninstall => match self.provider.uninstall(&name).await {
                Ok(()) => Ok(report(true, skipped, format!("Package {name} removed"))),
                Err(step) => {
                    let msg = step.to_string();
                    skipped.push(step);
                    Ok(report(false, skipped, msg))
                }
            },
        }
    }

    /// Reconcile resources one after another. A failed resource does not
    /// stop the ones after it.
    pub async fn apply(
        &self,
        resources: &[PackageResource],
        check_mode: bool,
    ) -> Vec<ResourceOutcome> {
        let mut outcomes = Vec::with_capacity(resources.len());
        for resource in resources {
            let result = self.ensure(resource, check_mode).await;
            if let Err(err) = &result {
                warn!(package = %resource.name, error = %err, "Reconciliation failed");
            }
            outcomes.push(ResourceOutcome {
                name: resource.name.clone(),
                result,
            });
        }
        outcomes
    }
}
