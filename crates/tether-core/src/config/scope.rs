//! Settings scope handling
//!
//! Defines the layers a settings value can be written to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Settings scope - which layer a value lives in
///
/// Layered reads return the value from the highest-precedence scope that
/// defines a key. A profile store reads and writes a single scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// User-wide settings shared by every workspace
    #[default]
    Global,
    /// Settings local to one workspace directory
    Workspace,
}

impl ConfigScope {
    /// Precedence order (higher = takes priority on read)
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Workspace => 2,
            Self::Global => 1,
        }
    }

    /// All scopes, highest precedence first
    #[must_use]
    pub fn read_order() -> &'static [ConfigScope] {
        &[Self::Workspace, Self::Global]
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Workspace => write!(f, "workspace"),
        }
    }
}

impl FromStr for ConfigScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" | "user" => Ok(Self::Global),
            "workspace" | "project" => Ok(Self::Workspace),
            _ => Err(ConfigError::InvalidScope(s.to_string())),
        }
    }
}
