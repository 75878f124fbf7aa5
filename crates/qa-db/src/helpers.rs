//! Row-to-entity mapping helpers.
//!
//! Rows are read into a [`Record`]: a column-name-keyed map of native SQLite
//! values. Entities build themselves from a `Record` through [`FromRecord`],
//! so `SELECT *` and `SELECT table.*` queries map without positional indexes.

use std::collections::HashMap;

use libsql::Value;

use crate::error::DatabaseError;

/// One result row, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Read every column of `row` into a record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is unnamed or cannot be read.
    pub fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        let count = row.column_count();
        let mut fields = HashMap::with_capacity(usize::try_from(count).unwrap_or_default());
        for idx in 0..count {
            let name = row
                .column_name(idx)
                .ok_or_else(|| DatabaseError::Query(format!("column {idx} has no name")))?;
            fields.insert(name.to_string(), row.get_value(idx)?);
        }
        Ok(Self { fields })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw value of a column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if the column is absent.
    pub fn value(&self, column: &str) -> Result<&Value, DatabaseError> {
        self.fields
            .get(column)
            .ok_or_else(|| DatabaseError::Query(format!("missing column '{column}'")))
    }

    /// Read a nullable INTEGER column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if the column is absent or not an integer.
    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>, DatabaseError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Integer(n) => Ok(Some(*n)),
            other => Err(type_mismatch(column, "integer", other)),
        }
    }

    /// Read a required INTEGER column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` on NULL, `Query` on a bad type.
    pub fn i64(&self, column: &str) -> Result<i64, DatabaseError> {
        self.opt_i64(column)?.ok_or_else(|| null_in(column))
    }

    /// Read a nullable TEXT column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if the column is absent or not text.
    pub fn opt_string(&self, column: &str) -> Result<Option<String>, DatabaseError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(type_mismatch(column, "text", other)),
        }
    }

    /// Read a required TEXT column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` on NULL, `Query` on a bad type.
    pub fn string(&self, column: &str) -> Result<String, DatabaseError> {
        self.opt_string(column)?.ok_or_else(|| null_in(column))
    }

    /// Read a boolean-like INTEGER column. Any non-zero value is `true`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` on NULL, `Query` on a bad type.
    pub fn bool(&self, column: &str) -> Result<bool, DatabaseError> {
        Ok(self.i64(column)? != 0)
    }
}

fn type_mismatch(column: &str, expected: &str, found: &Value) -> DatabaseError {
    DatabaseError::Query(format!(
        "column '{column}': expected {expected}, found {found:?}"
    ))
}

fn null_in(column: &str) -> DatabaseError {
    DatabaseError::InvalidState(format!("NULL in required column '{column}'"))
}

/// Construct an entity from a name-keyed record.
pub trait FromRecord: Sized {
    /// # Errors
    ///
    /// Returns `DatabaseError` if a required column is missing or mistyped.
    fn from_record(record: &Record) -> Result<Self, DatabaseError>;
}

/// Drain every row into memory before any mapping happens.
///
/// # Errors
///
/// Returns `DatabaseError` if fetching or reading a row fails.
pub async fn collect_records(mut rows: libsql::Rows) -> Result<Vec<Record>, DatabaseError> {
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(Record::from_row(&row)?);
    }
    Ok(records)
}

/// Map every record to `T`.
///
/// # Errors
///
/// Returns the first mapping error.
pub fn map_records<T: FromRecord>(records: &[Record]) -> Result<Vec<T>, DatabaseError> {
    records.iter().map(T::from_record).collect()
}
