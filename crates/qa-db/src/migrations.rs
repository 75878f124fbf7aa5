//! Schema bootstrap.
//!
//! Embeds the SQL file at compile time and executes it on database open.
//! All statements use `IF NOT EXISTS` so re-running is a no-op.

use crate::QaDb;
use crate::error::DatabaseError;

/// Five tables plus foreign-key indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl QaDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
