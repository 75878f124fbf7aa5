//! # qa-db
//!
//! libSQL data-access layer for the Q&A forum.
//!
//! Maps the five forum tables (users, questions, replies, question follows,
//! question likes) to the plain structs in `qa-core`. Every operation issues
//! one parameterized statement, materializes the rows, and maps them by
//! column name. There is no query builder, caching, or transaction layer.
//!
//! The connection is an explicit value: open a [`service::QaService`] and pass
//! it to whatever needs the store.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use qa_config::DatabaseConfig;

/// Database handle: one libSQL database and its single connection.
pub struct QaDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl QaDb {
    /// Open a local database at the given path with default settings.
    ///
    /// Use `":memory:"` for a throwaway store. The schema is created on
    /// first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// schema bootstrap fails.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_with_config(&DatabaseConfig {
            path: path.to_string(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Open the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the config is invalid, the database cannot
    /// be opened, or the schema bootstrap fails.
    pub async fn open_with_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        config.validate()?;

        let db = Builder::new_local(&config.path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite. The bundled build defaults to ON.
        let pragma = if config.foreign_keys {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };
        conn.execute(pragma, ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("{pragma}: {e}")))?;

        let qa_db = Self { db, conn };
        qa_db.run_migrations().await?;
        tracing::debug!(path = %config.path, "opened forum database");
        Ok(qa_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Rowid generated by the most recent successful INSERT on this connection.
    #[must_use]
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}
