//! Profile storage operations (CRUD)

use tracing::{debug, info};

use crate::auth::{self, ValidationResult};
use crate::config::{ConfigResult, ConfigScope, ConfigurationStore};

use super::types::{Profile, ProfileCollection, ProfileDetail};

/// Settings key the profile collection is stored under
pub const PROFILES_CONFIG_KEY: &str = "connectionProfiles";

/// Profile storage operations over an injected settings backend.
///
/// Nothing is cached: every call reads the collection from the backend, and
/// every mutation writes the whole collection back in one `update`. Reads and
/// writes both target the store's scope, so a write never copies another
/// layer's profiles into it.
#[derive(Debug, Clone)]
pub struct ProfileStore<S> {
    backend: S,
    key: String,
    scope: ConfigScope,
}

impl<S: ConfigurationStore> ProfileStore<S> {
    /// Create a new profile store writing to global scope
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            key: PROFILES_CONFIG_KEY.to_string(),
            scope: ConfigScope::Global,
        }
    }

    /// Store the collection under a different settings key
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Read and write a different scope
    #[must_use]
    pub fn with_scope(mut self, scope: ConfigScope) -> Self {
        self.scope = scope;
        self
    }

    /// The settings backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the current collection from the store's scope
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    pub fn load(&self) -> ConfigResult<ProfileCollection> {
        let value = self.backend.get_scoped(&self.key, self.scope)?;
        debug!(
            key = %self.key,
            scope = %self.scope,
            present = value.is_some(),
            "loaded profile collection"
        );
        ProfileCollection::from_value(value)
    }

    fn save(&self, collection: &ProfileCollection) -> ConfigResult<()> {
        self.backend
            .update(&self.key, Some(collection.to_value()?), self.scope)
    }

    /// Number of stored profiles
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read
    pub fn len(&self) -> ConfigResult<usize> {
        Ok(self.load()?.len())
    }

    /// Whether no profiles are stored
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read
    pub fn is_empty(&self) -> ConfigResult<bool> {
        Ok(self.load()?.is_empty())
    }

    /// Profile names in storage order
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read
    pub fn list_profile(&self) -> ConfigResult<Vec<String>> {
        Ok(self.load()?.names())
    }

    /// Get a profile by name
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read or the entry is
    /// not a profile object
    pub fn get_profile_by_name(&self, name: &str) -> ConfigResult<Option<Profile>> {
        self.load()?.get(name)
    }

    /// Create or replace a profile.
    ///
    /// Replacement is wholesale: fields absent from `profile` are absent
    /// afterwards. To change one field, fetch, edit, then upsert.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read or written
    pub fn upsert_profile(&self, name: &str, profile: &Profile) -> ConfigResult<()> {
        let mut collection = self.load()?;
        let replaced = collection.insert(name, profile)?;
        self.save(&collection)?;
        info!(profile = name, replaced, "saved profile");
        Ok(())
    }

    /// Delete a profile. Absent names are a no-op.
    ///
    /// The active-profile pointer is left as is, even when it names the
    /// deleted profile.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read or written
    pub fn delete_profile(&self, name: &str) -> ConfigResult<()> {
        let mut collection = self.load()?;
        if !collection.remove(name) {
            debug!(profile = name, "delete of unknown profile ignored");
            return Ok(());
        }
        self.save(&collection)?;
        info!(profile = name, "deleted profile");
        Ok(())
    }

    /// Select the active profile. The name is not checked against the
    /// stored profiles.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read or written
    pub fn update_active_profile_setting(&self, name: &str) -> ConfigResult<()> {
        let mut collection = self.load()?;
        collection.active_profile = name.to_string();
        self.save(&collection)?;
        info!(profile = name, "set active profile");
        Ok(())
    }

    /// Name of the active profile, empty when none is selected
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read
    pub fn get_active_profile(&self) -> ConfigResult<String> {
        Ok(self.load()?.active_profile)
    }

    /// The active profile name together with its profile.
    ///
    /// `profile` is `None` when nothing is selected or the selection names
    /// a profile that no longer exists.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read
    pub fn get_active_profile_detail(&self) -> ConfigResult<ProfileDetail> {
        let collection = self.load()?;
        let profile = if collection.active_profile.is_empty() {
            None
        } else {
            collection.get(&collection.active_profile)?
        };
        Ok(ProfileDetail::new(collection.active_profile, profile))
    }

    /// Resolve the authentication type for `detail`
    #[must_use]
    pub fn validate_profile(&self, detail: &ProfileDetail) -> ValidationResult {
        auth::validate(&detail.name, detail.profile.as_ref())
    }

    /// Resolve the authentication type for the active profile
    ///
    /// # Errors
    /// Returns an error if the collection cannot be read
    pub fn validate_active_profile(&self) -> ConfigResult<ValidationResult> {
        let detail = self.get_active_profile_detail()?;
        Ok(self.validate_profile(&detail))
    }
}
