//! Profile data model
//!
//! Stored data is decoded leniently. A known field holding something other
//! than a string is kept in `extra` instead of failing the read, and a
//! collection with an odd `activeProfile` or `profiles` value reads as empty
//! in that part.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::{ConfigError, ConfigResult};

const ENDPOINT: &str = "endpoint";
const CONTEXT: &str = "context";
const CLIENT_ID: &str = "clientId";
const CLIENT_SECRET: &str = "clientSecret";
const USERNAME: &str = "username";
const TOKEN_FILE: &str = "tokenFile";

/// One named connection definition.
///
/// Every field is optional. Keys this type does not know about, and known
/// keys whose value is not a string, are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    /// Target service URL
    pub endpoint: Option<String>,

    /// Named execution context on the service
    pub context: Option<String>,

    /// OAuth client id; selects code-grant authentication
    pub client_id: Option<String>,

    /// OAuth client secret, may be empty for public clients
    pub client_secret: Option<String>,

    /// User name for password authentication
    pub username: Option<String>,

    /// Path to a file holding an access token
    pub token_file: Option<String>,

    /// Unrecognized keys, preserved as stored
    pub extra: Map<String, Value>,
}

/// Take `key` out of `fields` only if it holds a string
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.shift_remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            endpoint: take_string(&mut fields, ENDPOINT),
            context: take_string(&mut fields, CONTEXT),
            client_id: take_string(&mut fields, CLIENT_ID),
            client_secret: take_string(&mut fields, CLIENT_SECRET),
            username: take_string(&mut fields, USERNAME),
            token_file: take_string(&mut fields, TOKEN_FILE),
            extra: fields,
        }
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let known: Vec<(&str, &str)> = [
            (ENDPOINT, &self.endpoint),
            (CONTEXT, &self.context),
            (CLIENT_ID, &self.client_id),
            (CLIENT_SECRET, &self.client_secret),
            (USERNAME, &self.username),
            (TOKEN_FILE, &self.token_file),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
        .collect();

        // A set field wins over a stale non-string value kept under its key.
        let extra = self
            .extra
            .iter()
            .filter(|(key, _)| !known.iter().any(|(name, _)| *name == key.as_str()));

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &known {
            map.serialize_entry(key, value)?;
        }
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Profile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}

impl Profile {
    /// Create a profile with no fields set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the execution context
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the OAuth client id and secret
    #[must_use]
    pub fn with_client(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the password sign-in user name
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the access token file path
    #[must_use]
    pub fn with_token_file(mut self, token_file: impl Into<String>) -> Self {
        self.token_file = Some(token_file.into());
        self
    }
}

/// A profile name paired with the profile found for it, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDetail {
    pub name: String,
    pub profile: Option<Profile>,
}

impl ProfileDetail {
    #[must_use]
    pub fn new(name: impl Into<String>, profile: Option<Profile>) -> Self {
        Self {
            name: name.into(),
            profile,
        }
    }
}

/// The persisted root object: every profile plus the active-profile pointer.
///
/// Entries are held as raw JSON in storage order so that listing, counting
/// and deleting never depend on an entry being well formed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCollection {
    /// Name of the selected profile, empty when none is selected
    #[serde(default, deserialize_with = "string_or_empty")]
    pub active_profile: String,

    /// Profile name -> profile record
    #[serde(default, deserialize_with = "object_or_empty")]
    pub profiles: Map<String, Value>,

    /// Other top-level keys, preserved as stored
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => {
            warn!(found = %other, "activeProfile is not a string, reading as unset");
            String::new()
        }
    })
}

fn object_or_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(profiles) => profiles,
        Value::Null => Map::new(),
        other => {
            warn!(found = %other, "profiles is not an object, reading as empty");
            Map::new()
        }
    })
}

impl ProfileCollection {
    /// Decode a collection from a settings value.
    ///
    /// A missing value, or one that is not an object, is an empty
    /// collection. Nothing is written back until the collection is saved.
    ///
    /// # Errors
    /// Returns an error if the object cannot be decoded
    pub fn from_value(value: Option<Value>) -> ConfigResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|e| ConfigError::InvalidCollection(e.to_string())),
            Some(other) => {
                warn!(found = %other, "profile collection is not an object, reading as empty");
                Ok(Self::default())
            }
        }
    }

    /// Encode the collection as a settings value
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::Internal(e.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profile names in storage order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Decode the profile stored under `name`
    ///
    /// # Errors
    /// Returns an error if the stored entry is not a profile object
    pub fn get(&self, name: &str) -> ConfigResult<Option<Profile>> {
        self.profiles
            .get(name)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| {
                    ConfigError::InvalidCollection(format!("profile '{name}': {e}"))
                })
            })
            .transpose()
    }

    /// Store `profile` under `name`, replacing any previous entry wholesale.
    /// Returns `true` if an entry was replaced.
    ///
    /// # Errors
    /// Returns an error if the profile cannot be serialized
    pub fn insert(&mut self, name: &str, profile: &Profile) -> ConfigResult<bool> {
        let value =
            serde_json::to_value(profile).map_err(|e| ConfigError::Internal(e.to_string()))?;
        Ok(self.profiles.insert(name.to_string(), value).is_some())
    }

    /// Remove the entry for `name`. Returns `true` if one existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.profiles.shift_remove(name).is_some()
    }
}
