//! JSON settings file backend
//!
//! Each scope is one pretty-printed JSON object on disk. Files are re-read on
//! every `get`, so edits made by other processes are always observed.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use super::{ConfigError, ConfigResult, ConfigScope, ConfigurationStore};

/// File name used for the default global settings file
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Environment variable overriding the settings directory
pub const TETHER_HOME_ENV: &str = "TETHER_HOME";

/// Resolve the default global settings path.
///
/// `$TETHER_HOME/settings.json` when the variable is set, otherwise
/// `~/.tether/settings.json`.
///
/// # Errors
/// Returns an error if no home directory can be determined
pub fn default_settings_path() -> ConfigResult<PathBuf> {
    if let Some(dir) = std::env::var_os(TETHER_HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(SETTINGS_FILE_NAME));
    }
    dirs::home_dir()
        .map(|home| home.join(".tether").join(SETTINGS_FILE_NAME))
        .ok_or_else(|| ConfigError::Internal("Cannot find home directory".into()))
}

/// Settings backend storing each scope in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    global_path: PathBuf,
    workspace_path: Option<PathBuf>,
}

impl JsonFileStore {
    /// Create a store backed by the given global settings file
    #[must_use]
    pub fn new(global_path: impl Into<PathBuf>) -> Self {
        Self {
            global_path: global_path.into(),
            workspace_path: None,
        }
    }

    /// Create a store at [`default_settings_path`]
    ///
    /// # Errors
    /// Returns an error if no home directory can be determined
    pub fn open_default() -> ConfigResult<Self> {
        Ok(Self::new(default_settings_path()?))
    }

    /// Layer a workspace settings file over the global one
    #[must_use]
    pub fn with_workspace(mut self, path: impl Into<PathBuf>) -> Self {
        self.workspace_path = Some(path.into());
        self
    }

    /// Path of the file backing `scope`, if that scope is configured
    #[must_use]
    pub fn path_for(&self, scope: ConfigScope) -> Option<&Path> {
        match scope {
            ConfigScope::Global => Some(&self.global_path),
            ConfigScope::Workspace => self.workspace_path.as_deref(),
        }
    }

    fn require_path(&self, scope: ConfigScope) -> ConfigResult<&Path> {
        self.path_for(scope).ok_or_else(|| {
            ConfigError::InvalidScope(format!("{scope} settings file not configured"))
        })
    }

    fn read_document(path: &Path) -> ConfigResult<Option<Map<String, Value>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let json: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::JsonParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        match json {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(ConfigError::JsonParseError {
                path: path.to_path_buf(),
                message: "Expected JSON object".into(),
            }),
        }
    }

    fn write_document(path: &Path, document: &Map<String, Value>) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| ConfigError::Internal(e.to_string()))?;

        fs::write(path, content).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl ConfigurationStore for JsonFileStore {
    fn get(&self, key: &str) -> ConfigResult<Option<Value>> {
        if let Some(path) = self.path_for(ConfigScope::Workspace) {
            if let Some(value) = Self::read_document(path)?.and_then(|mut doc| doc.remove(key)) {
                debug!(key, path = %path.display(), "read workspace setting");
                return Ok(Some(value));
            }
        }
        self.get_scoped(key, ConfigScope::Global)
    }

    fn get_scoped(&self, key: &str, scope: ConfigScope) -> ConfigResult<Option<Value>> {
        let path = self.require_path(scope)?;
        if let Some(mut document) = Self::read_document(path)? {
            return Ok(document.remove(key));
        }

        if scope == ConfigScope::Global {
            // First use: materialize an empty settings file.
            Self::write_document(path, &Map::new())?;
            debug!(path = %path.display(), "created settings file");
        }
        Ok(None)
    }

    fn update(&self, key: &str, value: Option<Value>, scope: ConfigScope) -> ConfigResult<()> {
        let path = self.require_path(scope)?;
        let mut document = Self::read_document(path)?.unwrap_or_default();
        match value {
            Some(value) => {
                document.insert(key.to_string(), value);
            }
            None => {
                document.shift_remove(key);
            }
        }

        Self::write_document(path, &document)?;
        debug!(key, %scope, path = %path.display(), "wrote setting");
        Ok(())
    }
}
