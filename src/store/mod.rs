/// Store collaborator
///
/// The ORM core only needs two things from a relational store: run a query
/// and get rows back, run a statement and get its effect back. Parameters are
/// positional (`?`) and bound in order.

pub mod config;
pub mod sqlite;

pub use config::StoreConfig;
pub use sqlite::SqliteStore;

use thiserror::Error;
use crate::core::{quote_identifier, FieldType, Value};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Column '{column}' holds {found}, which cannot be read as {expected}")]
    Scan {
        column: String,
        expected: FieldType,
        found: String,
    },
    #[error("Row has {found} columns but {expected} were selected")]
    ColumnCount { expected: usize, found: usize },
    #[error("Result columns {found:?} do not match record columns {expected:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("No such table: {0}")]
    MissingTable(String),
}

impl StoreError {
    /// True when the store reported that the addressed table does not exist.
    /// Every other failure (syntax, locking, I/O) is an execution failure.
    #[must_use]
    pub fn is_missing_table(&self) -> bool {
        match self {
            Self::MissingTable(_) => true,
            Self::Sqlite(rusqlite::Error::SqliteFailure(_, Some(msg))) => {
                msg.starts_with("no such table")
            }
            _ => false,
        }
    }
}

/// Fully drained result of a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Effect of a data-modifying statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: usize,
    /// Identity assigned by the most recent successful insert
    pub last_insert_id: i64,
}

/// Trait for relational store operations
pub trait Store {
    /// Run a query and return every row it produces
    fn query(&self, sql: &str, params: &[Value]) -> Result<RowSet, StoreError>;

    /// Run a statement and report rows affected plus the last identity
    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecOutcome, StoreError>;

    /// Bounded read against a table. A table that does not exist fails with
    /// an error for which [`StoreError::is_missing_table`] holds.
    fn probe_table(&self, table: &str) -> Result<(), StoreError> {
        self.query(&format!("SELECT * FROM {} LIMIT 1", quote_identifier(table)), &[])
            .map(|_| ())
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn query(&self, sql: &str, params: &[Value]) -> Result<RowSet, StoreError> {
        (**self).query(sql, params)
    }

    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecOutcome, StoreError> {
        (**self).execute(sql, params)
    }

    fn probe_table(&self, table: &str) -> Result<(), StoreError> {
        (**self).probe_table(table)
    }
}
