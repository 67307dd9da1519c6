//! Settings backend module
//!
//! The profile store never touches disk itself. It reads and writes one
//! settings key through a [`ConfigurationStore`], which is injected so the
//! store can run against a file, an in-memory fake, or a host application's
//! own settings layer.

mod error;
mod json_file;
mod memory;
mod scope;

use serde_json::Value;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use json_file::{default_settings_path, JsonFileStore, SETTINGS_FILE_NAME, TETHER_HOME_ENV};
pub use memory::MemoryStore;
pub use scope::ConfigScope;

/// Key/value settings backend.
///
/// Values are whole JSON documents; writers replace the value of a key in
/// one call, and the last write wins.
pub trait ConfigurationStore {
    /// Read the value stored under `key`, honouring scope precedence.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    fn get(&self, key: &str) -> ConfigResult<Option<Value>>;

    /// Read the value stored under `key` in `scope` alone, ignoring the
    /// other layers.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read or does not
    /// support `scope`
    fn get_scoped(&self, key: &str, scope: ConfigScope) -> ConfigResult<Option<Value>>;

    /// Replace the value under `key` in `scope`. `None` clears the key.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written or does not
    /// support `scope`
    fn update(&self, key: &str, value: Option<Value>, scope: ConfigScope) -> ConfigResult<()>;
}

impl<S: ConfigurationStore + ?Sized> ConfigurationStore for &S {
    fn get(&self, key: &str) -> ConfigResult<Option<Value>> {
        (**self).get(key)
    }

    fn get_scoped(&self, key: &str, scope: ConfigScope) -> ConfigResult<Option<Value>> {
        (**self).get_scoped(key, scope)
    }

    fn update(&self, key: &str, value: Option<Value>, scope: ConfigScope) -> ConfigResult<()> {
        (**self).update(key, value, scope)
    }
}
