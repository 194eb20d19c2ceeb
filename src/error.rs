//! Error types for table configuration.

use thiserror::Error;

/// Errors raised while building or validating a [`TableConfig`](crate::TableConfig).
///
/// Table operations themselves never fail; a missing key is reported through `Option`/`bool`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A table needs at least one bucket.
    #[error("initial bucket count must be greater than zero")]
    ZeroInitialSize,

    /// The load factor must be finite and strictly positive.
    #[error("invalid max load factor: {0}")]
    InvalidLoadFactor(f32),

    /// The TOML document could not be parsed.
    #[error("failed to parse table config: {0}")]
    Parse(#[from] toml::de::Error),
}
