//! Service layer every entity mapper routes through.
//!
//! `QaService` owns the `QaDb` handle. All repository methods are implemented
//! as `impl QaService` blocks in `crate::repos`, and all of them use the
//! statement helpers below so each read is one parameterized round trip.

use libsql::params::IntoParams;
use qa_config::QaConfig;

use crate::QaDb;
use crate::error::DatabaseError;
use crate::helpers::{FromRecord, Record, collect_records, map_records};

/// Explicitly constructed, explicitly passed store handle.
pub struct QaService {
    db: QaDb,
}

impl QaService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(QaDb::open_local(db_path).await?))
    }

    /// Create a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the config is invalid or the database cannot be opened.
    pub async fn from_config(config: &QaConfig) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(QaDb::open_with_config(&config.database).await?))
    }

    /// Create from an existing `QaDb`.
    #[must_use]
    pub const fn from_db(db: QaDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &QaDb {
        &self.db
    }

    /// Run a SELECT and materialize all rows as records.
    pub(crate) async fn query_records(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Vec<Record>, DatabaseError> {
        let rows = self.db.conn().query(sql, params).await?;
        collect_records(rows).await
    }

    /// Run a SELECT and map every row to `T`.
    pub(crate) async fn query_all<T: FromRecord>(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Vec<T>, DatabaseError> {
        let records = self.query_records(sql, params).await?;
        map_records(&records)
    }

    /// Run a SELECT and map the first row, if any, to `T`.
    pub(crate) async fn query_first<T: FromRecord>(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Option<T>, DatabaseError> {
        let records = self.query_records(sql, params).await?;
        records.first().map(T::from_record).transpose()
    }

    /// Run an INSERT and return the generated rowid.
    pub(crate) async fn insert(
        &self,
        table: &'static str,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<i64, DatabaseError> {
        self.db.conn().execute(sql, params).await?;
        let id = self.db.last_insert_id();
        tracing::debug!(table, id, "inserted row");
        Ok(id)
    }
}

/// Reject `create` on an entity that already has an id.
pub(crate) fn ensure_unsaved(entity: &'static str, id: Option<i64>) -> Result<(), DatabaseError> {
    match id {
        Some(id) => {
            tracing::warn!(entity, id, "refusing to create an already saved entity");
            Err(DatabaseError::AlreadyPersisted { entity, id })
        }
        None => Ok(()),
    }
}

/// The id of a saved entity, or `NotPersisted`.
pub(crate) const fn require_id(entity: &'static str, id: Option<i64>) -> Result<i64, DatabaseError> {
    match id {
        Some(id) => Ok(id),
        None => Err(DatabaseError::NotPersisted { entity }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_config::DatabaseConfig;

    #[tokio::test]
    async fn from_config_opens_in_memory_store() {
        let config = QaConfig {
            database: DatabaseConfig::in_memory(),
        };
        let svc = QaService::from_config(&config).await.unwrap();
        let records = svc
            .query_records("SELECT COUNT(*) AS n FROM users", ())
            .await
            .unwrap();
        assert_eq!(records[0].i64("n").unwrap(), 0);
    }

    #[test]
    fn ensure_unsaved_rejects_existing_id() {
        assert!(ensure_unsaved("User", None).is_ok());
        let err = ensure_unsaved("User", Some(3)).unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::AlreadyPersisted { entity: "User", id: 3 }
        ));
        assert_eq!(err.to_string(), "User already saved with id 3");
    }

    #[test]
    fn require_id_rejects_unsaved() {
        assert_eq!(require_id("Question", Some(9)).unwrap(), 9);
        assert!(matches!(
            require_id("Question", None),
            Err(DatabaseError::NotPersisted { entity: "Question" })
        ));
    }
}
