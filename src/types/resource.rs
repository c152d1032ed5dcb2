//! Desired-state records supplied by the orchestrator

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::provider::CaskError;

/// What the orchestrator wants the package to look like
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PresenceSpec {
    Absent,
    #[default]
    Present,
    Version(String),
    Latest,
}

impl PresenceSpec {
    /// The pinned version, if any
    pub fn version(&self) -> Option<&str> {
        match self {
            PresenceSpec::Version(version) => Some(version),
            _ => None,
        }
    }

    /// Keywords map to their state; any other text is a pinned version
    fn from_keyword(text: &str) -> Self {
        match text.trim() {
            "absent" | "removed" | "false" => PresenceSpec::Absent,
            "present" | "installed" | "true" => PresenceSpec::Present,
            "latest" => PresenceSpec::Latest,
            other => PresenceSpec::Version(other.to_string()),
        }
    }
}

impl From<bool> for PresenceSpec {
    fn from(flag: bool) -> Self {
        if flag {
            PresenceSpec::Present
        } else {
            PresenceSpec::Absent
        }
    }
}

impl FromStr for PresenceSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PresenceSpec::from_keyword(s))
    }
}

impl fmt::Display for PresenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceSpec::Absent => f.write_str("absent"),
            PresenceSpec::Present => f.write_str("present"),
            PresenceSpec::Latest => f.write_str("latest"),
            PresenceSpec::Version(version) => f.write_str(version),
        }
    }
}

impl Serialize for PresenceSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PresenceSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // YAML authors write `ensure: true` as often as `ensure: present`
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEnsure {
            Flag(bool),
            Text(String),
            Number(serde_yaml::Number),
        }

        let spec = match RawEnsure::deserialize(deserializer)? {
            RawEnsure::Flag(flag) => PresenceSpec::from(flag),
            RawEnsure::Text(text) => PresenceSpec::from_keyword(&text),
            // `1.10` has already been read as 1.1 by the time it gets here
            RawEnsure::Number(number) if number.is_f64() => {
                return Err(de::Error::custom(format!(
                    "ensure version {number} was read as a number and may have lost digits; quote it"
                )));
            }
            RawEnsure::Number(number) => PresenceSpec::Version(number.to_string()),
        };
        Ok(spec)
    }
}

/// A package resource as handed over by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageResource {
    pub name: String,
    #[serde(default)]
    pub ensure: PresenceSpec,
    #[serde(default)]
    pub install_options: Vec<String>,
}

impl PackageResource {
    pub fn new(name: impl Into<String>, ensure: PresenceSpec) -> Self {
        Self {
            name: name.into(),
            ensure,
            install_options: Vec::new(),
        }
    }

    pub fn with_install_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.install_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects names that cannot act as an identity key for the tool
    pub fn validate(&self) -> Result<(), CaskError> {
        validate_name(&self.name)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), CaskError> {
    if name.is_empty() {
        return Err(CaskError::InvalidResource {
            reason: "package name must not be empty".to_string(),
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(CaskError::InvalidResource {
            reason: format!("package name '{name}' contains whitespace"),
        });
    }
    Ok(())
}
