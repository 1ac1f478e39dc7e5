//! Error types for configuration and persistence

use thiserror::Error;

/// Configuration resolution errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The named connection string is absent or blank
    #[error("connection string `{key}` is not configured")]
    MissingConnectionString {
        /// Configuration key that was looked up
        key: &'static str,
    },

    /// The configuration sources could not be read or deserialized
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// Errors surfaced by the persistence context
#[derive(Debug, Error)]
pub enum StoreError {
    /// Fatal configuration problem, raised at construction time
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A unique index rejected the change
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A row-level check constraint rejected the change
    #[error("check constraint violation: {0}")]
    CheckViolation(String),

    /// Transient connectivity failure that survived every retry
    #[error("transient database failure after {attempts} attempts: {source}")]
    TransientExhausted {
        /// Total number of attempts made
        attempts: u32,
        /// Error returned by the final attempt
        #[source]
        source: sea_orm::DbErr,
    },

    /// The operation was cancelled before completion
    #[error("operation cancelled")]
    Cancelled,

    /// A stored value could not be mapped onto a domain model
    #[error("invalid stored value: {0}")]
    InvalidRow(String),

    /// Any other database error
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}
