//! Authentication type resolution
//!
//! Decides which sign-in mechanism a profile implies. A profile may carry
//! fields left over from earlier configurations, so the checks run in a
//! fixed order and the first match wins:
//!
//! 1. no profile at all -> [`AuthType::Error`] ("No Active Profile")
//! 2. `clientId` -> [`AuthType::AuthCode`]
//! 3. `tokenFile` -> [`AuthType::TokenFile`]
//! 4. `username` -> [`AuthType::Password`]
//! 5. otherwise -> [`AuthType::Error`] ("Incomplete profile")
//!
//! Empty strings count as not provided.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::profile::Profile;

/// Error message when no profile could be located
pub const NO_ACTIVE_PROFILE: &str = "No Active Profile";

/// Error message when a profile carries no credential field
pub const INCOMPLETE_PROFILE: &str = "Incomplete profile";

/// Authentication mechanism implied by a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// OAuth authorization code grant (client id/secret)
    AuthCode,
    /// Access token read from a file
    TokenFile,
    /// Interactive user name and password
    Password,
    /// No usable mechanism
    Error,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthCode => write!(f, "authcode"),
            Self::TokenFile => write!(f, "tokenfile"),
            Self::Password => write!(f, "password"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "authcode" => Ok(Self::AuthCode),
            "tokenfile" => Ok(Self::TokenFile),
            "password" => Ok(Self::Password),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown auth type: {s}")),
        }
    }
}

/// Outcome of resolving a profile's authentication type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Resolved mechanism
    #[serde(rename = "type")]
    pub auth_type: AuthType,

    /// Mechanism-specific payload: the token file path or the user name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Diagnostic, empty unless `auth_type` is [`AuthType::Error`]
    pub error: String,
}

impl ValidationResult {
    fn resolved(auth_type: AuthType, data: Option<Value>) -> Self {
        Self {
            auth_type,
            data,
            error: String::new(),
        }
    }

    fn failed(error: &str) -> Self {
        Self {
            auth_type: AuthType::Error,
            data: None,
            error: error.to_string(),
        }
    }

    /// Whether a usable mechanism was found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.auth_type != AuthType::Error
    }
}

/// Treat an empty string the same as an absent field.
fn provided(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

/// Resolve the authentication type for the profile `name`.
///
/// Pure: reads nothing but its arguments.
#[must_use]
pub fn validate(name: &str, profile: Option<&Profile>) -> ValidationResult {
    let Some(profile) = profile else {
        tracing::debug!(profile = name, "no profile to validate");
        return ValidationResult::failed(NO_ACTIVE_PROFILE);
    };

    let result = if provided(profile.client_id.as_ref()).is_some() {
        ValidationResult::resolved(AuthType::AuthCode, None)
    } else if let Some(token_file) = provided(profile.token_file.as_ref()) {
        ValidationResult::resolved(AuthType::TokenFile, Some(Value::from(token_file)))
    } else if let Some(username) = provided(profile.username.as_ref()) {
        ValidationResult::resolved(AuthType::Password, Some(Value::from(username)))
    } else {
        ValidationResult::failed(INCOMPLETE_PROFILE)
    };

    tracing::debug!(profile = name, auth_type = %result.auth_type, "resolved auth type");
    result
}
