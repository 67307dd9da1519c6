//! In-memory settings backend

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::debug;

use super::{ConfigError, ConfigResult, ConfigScope, ConfigurationStore};

type Layers = HashMap<ConfigScope, Map<String, Value>>;

/// Settings held in process memory, one map per scope.
///
/// Used by tests and by hosts that persist settings elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    layers: Mutex<Layers>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `value` already set under `key` in global scope
    #[must_use]
    pub fn with_value(key: &str, value: Value) -> Self {
        let mut global = Map::new();
        global.insert(key.to_string(), value);
        let mut layers = HashMap::new();
        layers.insert(ConfigScope::Global, global);
        Self {
            layers: Mutex::new(layers),
        }
    }

    fn lock(&self) -> ConfigResult<MutexGuard<'_, Layers>> {
        self.layers
            .lock()
            .map_err(|e| ConfigError::Internal(format!("settings lock poisoned: {e}")))
    }
}

impl ConfigurationStore for MemoryStore {
    fn get(&self, key: &str) -> ConfigResult<Option<Value>> {
        let layers = self.lock()?;
        let value = ConfigScope::read_order()
            .iter()
            .find_map(|scope| layers.get(scope).and_then(|map| map.get(key)))
            .cloned();
        Ok(value)
    }

    fn get_scoped(&self, key: &str, scope: ConfigScope) -> ConfigResult<Option<Value>> {
        let layers = self.lock()?;
        Ok(layers.get(&scope).and_then(|map| map.get(key)).cloned())
    }

    fn update(&self, key: &str, value: Option<Value>, scope: ConfigScope) -> ConfigResult<()> {
        let mut layers = self.lock()?;
        let map = layers.entry(scope).or_default();
        match value {
            Some(value) => {
                map.insert(key.to_string(), value);
            }
            None => {
                map.shift_remove(key);
            }
        }
        debug!(key, %scope, "updated in-memory setting");
        Ok(())
    }
}
