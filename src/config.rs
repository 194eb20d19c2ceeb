//! Table sizing parameters, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bucket count used when a config omits `initial_size`.
pub const DEFAULT_INITIAL_SIZE: usize = 16;

/// Ratio of entries to buckets above which the table doubles.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.7;

/// Sizing parameters for a [`HashTable`](crate::HashTable).
///
/// ```toml
/// initial_size = 2048
/// max_load_factor = 0.7
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Number of buckets allocated up front.
    pub initial_size: usize,
    /// Growth threshold, see [`DEFAULT_MAX_LOAD_FACTOR`].
    pub max_load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Config sized for roughly `expected_entries` keys: twice as many buckets as entries, so the
    /// table stays well under the default load factor without ever resizing.
    pub fn for_capacity(expected_entries: usize) -> Self {
        Self {
            initial_size: expected_entries.saturating_mul(2).max(1),
            ..Self::default()
        }
    }

    pub fn with_max_load_factor(mut self, max_load_factor: f32) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Parse and validate a config from TOML. Missing fields fall back to the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_size == 0 {
            return Err(ConfigError::ZeroInitialSize);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }
}
