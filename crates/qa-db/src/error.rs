//! Database error types for qa-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// `create` was called on an entity that already has an id.
    #[error("{entity} already saved with id {id}")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    /// An association was traversed on an entity that was never saved.
    #[error("{entity} has not been saved yet")]
    NotPersisted { entity: &'static str },

    /// A SQL query failed or returned an unexpected shape.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema bootstrap failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., NULL in a required column).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Store settings were rejected.
    #[error(transparent)]
    Config(#[from] qa_config::ConfigError),
}
