//! Tool configuration
//!
//! Everything that was a hard-coded command path or marker string lives in
//! [`ToolConfig`]. It is resolved once at startup and handed to every
//! component; nothing in the crate reads process-wide state after that.

pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::runner::CommandLine;
use crate::types::ProviderId;

const CONFIG_DIR: &str = "rustle-cask";
const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Package manager executable, absolute or looked up on PATH
    pub program: PathBuf,
    /// Arguments placed between the program and the verb
    pub prefix: Vec<String>,
    pub verbs: Verbs,
    /// Fixed installation root; discovered from the tool when unset
    pub install_root: Option<PathBuf>,
    pub markers: Markers,
    pub identifier: IdentifierRule,
    pub provider: String,
    /// Environment overrides applied to every command
    pub environment: BTreeMap<String, String>,
    pub run_as: Option<RunAs>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/local/bin/brew"),
            prefix: vec!["cask".to_string()],
            verbs: Verbs::default(),
            install_root: None,
            markers: Markers::default(),
            identifier: IdentifierRule::default(),
            provider: "cask".to_string(),
            environment: BTreeMap::new(),
            run_as: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verbs {
    pub info: String,
    pub install: String,
    pub uninstall: String,
    pub list: String,
}

impl Default for Verbs {
    fn default() -> Self {
        Self {
            info: "info".to_string(),
            install: "install".to_string(),
            uninstall: "uninstall".to_string(),
            list: "list".to_string(),
        }
    }
}

/// Literal text the tool prints instead of failing with a status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Whole line printed by `info` for a package that is not installed
    pub not_installed: String,
    /// Substring printed by `install` when the package does not exist
    pub no_available: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            not_installed: "Not installed".to_string(),
            no_available: "No available cask".to_string(),
        }
    }
}

/// How a pinned version is folded into the identifier handed to `install`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierRule {
    /// `name-version`
    #[default]
    Dash,
    /// `name@version`
    At,
    /// Always the bare name
    Unversioned,
}

impl IdentifierRule {
    pub fn identifier(&self, name: &str, version: Option<&str>) -> String {
        match (self, version) {
            (IdentifierRule::Dash, Some(version)) => format!("{name}-{version}"),
            (IdentifierRule::At, Some(version)) => format!("{name}@{version}"),
            _ => name.to_string(),
        }
    }
}

/// Launch mutating commands as another user through sudo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAs {
    pub user: String,
    pub home: PathBuf,
    #[serde(default = "default_sudo")]
    pub sudo: PathBuf,
}

fn default_sudo() -> PathBuf {
    PathBuf::from("/usr/bin/sudo")
}

impl ToolConfig {
    /// Load a configuration file, falling back to defaults for absent keys
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ToolConfig =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "Loaded tool configuration");
        Ok(config)
    }

    /// Load from an explicit path, the user config directory, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Validate and pin the program to an absolute path
    pub fn resolve(mut self) -> Result<Self, ConfigError> {
        self.validate()?;

        if !self.program.is_absolute() {
            self.program =
                which::which(&self.program).map_err(|_| ConfigError::ProgramNotFound {
                    program: self.program.display().to_string(),
                })?;
        }
        if let Some(run_as) = self.run_as.as_mut() {
            if !run_as.sudo.is_absolute() {
                run_as.sudo =
                    which::which(&run_as.sudo).map_err(|_| ConfigError::ProgramNotFound {
                        program: run_as.sudo.display().to_string(),
                    })?;
            }
        }

        debug!(program = %self.program.display(), "Resolved package manager");
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "program must not be empty".to_string(),
            });
        }

        let verbs = [
            ("info", &self.verbs.info),
            ("install", &self.verbs.install),
            ("uninstall", &self.verbs.uninstall),
            ("list", &self.verbs.list),
        ];
        for (label, verb) in verbs {
            if verb.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    reason: format!("verb '{label}' must not be empty"),
                });
            }
        }

        if self.markers.not_installed.is_empty() || self.markers.no_available.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "output markers must not be empty".to_string(),
            });
        }

        if let Some(run_as) = &self.run_as {
            if run_as.user.is_empty() {
                return Err(ConfigError::Invalid {
                    reason: "run_as.user must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn provider_id(&self) -> ProviderId {
        ProviderId::new(&self.provider)
    }

    /// `<program> <prefix...> <args...>` run as the invoking user
    pub fn command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = CommandLine::new(&self.program)
            .args(self.prefix.iter().cloned())
            .args(args);
        for (key, value) in &self.environment {
            command = command.env(key, value);
        }
        command
    }

    /// Like [`ToolConfig::command`] but honours `run_as` for commands that
    /// change the host
    pub fn mutating_command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = self.command(args);
        match &self.run_as {
            Some(run_as) => command.run_as(run_as),
            None => command,
        }
    }
}
