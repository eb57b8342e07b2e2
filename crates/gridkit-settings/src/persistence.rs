//! Configuration persistence
//!
//! Loading comes in two modes:
//!
//! - **Merged**: the stored document is merged over the serialized defaults
//!   with [`merge_json`], so fields missing from an older document take
//!   their default values.
//! - **Raw**: the stored document must be complete on its own; anything less
//!   counts as no saved state.
//!
//! Every failure degrades to the default document with a warning. Nothing
//! here is fatal.

use crate::error::{SettingsError, SettingsResult};
use crate::store::StateStore;
use gridkit_core::constants::STATE_KEY;
use gridkit_core::Configuration;
use serde_json::Value;
use tracing::{debug, info, warn};

/// How a stored document is turned into a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Stored fields over defaults
    #[default]
    Merged,
    /// Stored document verbatim
    Raw,
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key by key; any other overlay value (arrays and `null`
/// included) replaces the base value.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse stored text into a configuration.
///
/// Numeric fields outside their ranges are clamped, in both modes.
pub fn parse_document(text: &str, mode: LoadMode) -> SettingsResult<Configuration> {
    let stored: Value = serde_json::from_str(text)?;
    if !stored.is_object() {
        return Err(SettingsError::NotAnObject(json_kind(&stored)));
    }

    let mut config: Configuration = match mode {
        LoadMode::Raw => serde_json::from_value(stored)?,
        LoadMode::Merged => {
            let mut document = serde_json::to_value(Configuration::default())?;
            merge_json(&mut document, stored);
            serde_json::from_value(document)?
        }
    };
    if config.sanitize() {
        warn!(?mode, "Saved state had out-of-range values, clamped");
    }
    Ok(config)
}

/// Loads and saves the configuration document through a [`StateStore`]
pub struct StatePersistence {
    store: Box<dyn StateStore>,
    key: String,
}

impl StatePersistence {
    /// Persistence under the standard state key
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self::with_key(store, STATE_KEY)
    }

    pub fn with_key(store: Box<dyn StateStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored configuration, `Ok(None)` when nothing is stored.
    pub fn try_load(&self, mode: LoadMode) -> SettingsResult<Option<Configuration>> {
        let Some(text) = self.store.read(&self.key)? else {
            return Ok(None);
        };
        parse_document(&text, mode).map(Some)
    }

    /// Load the configuration, falling back to defaults on any failure.
    pub fn load(&self, mode: LoadMode) -> Configuration {
        match self.try_load(mode) {
            Ok(Some(config)) => {
                info!(?mode, "Loaded saved state");
                config
            }
            Ok(None) => {
                debug!("No saved state, using defaults");
                Configuration::default()
            }
            Err(e) => {
                warn!(?mode, "Ignoring saved state: {}", e);
                Configuration::default()
            }
        }
    }

    pub fn try_save(&mut self, config: &Configuration) -> SettingsResult<()> {
        let text = serde_json::to_string(config)?;
        self.store.write(&self.key, &text)
    }

    /// Save, logging instead of returning failures.
    pub fn save(&mut self, config: &Configuration) {
        if let Err(e) = self.try_save(config) {
            warn!("Failed to save state: {}", e);
        }
    }

    /// Remove the stored document.
    pub fn clear(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => info!("Cleared saved state"),
            Err(e) => warn!("Failed to clear saved state: {}", e),
        }
    }
}

impl std::fmt::Debug for StatePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatePersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
