//! Error taxonomy for the registry and configuration layer.

use thiserror::Error;

/// Errors surfaced by variant resolution, default derivation, and
/// configuration validation.
///
/// None of these are transient: every operation that produces them is a
/// pure lookup or merge, so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The identity is not present in the registry or the default table.
    #[error("unknown algorithm variant: {0}")]
    UnknownVariant(String),

    /// A built-in default violates its own schema.
    ///
    /// Raised while the default table is constructed; the table is unusable
    /// afterwards.
    #[error("default table for {variant} violates its schema at `{field}`: {reason}")]
    SchemaViolation {
        variant: String,
        field: String,
        reason: String,
    },

    /// A caller-supplied configuration is not acceptable for the variant.
    #[error("invalid configuration for {variant} at `{field}`: {reason}")]
    InvalidConfig {
        variant: String,
        field: String,
        reason: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
