/// SQLite store backend (rusqlite)
///
/// Every cursor is drained and dropped inside the call that opened it, on
/// success and on error.

use std::time::Duration;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use super::{ExecOutcome, RowSet, Store, StoreConfig, StoreError};
use crate::core::Value;

/// Text layout timestamps are written with
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database named by `config` (`:memory:` for a private in-memory one)
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.database)?
        };
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;

        tracing::info!(database = %config.database, "opened sqlite store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(&StoreConfig::default())
    }

    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Underlying connection, for schema setup the ORM does not cover
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    #[must_use]
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn read_value(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::BigInt(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => match std::str::from_utf8(t) {
                Ok(s) => Value::Text(s.to_string()),
                Err(_) => Value::Bytea(t.to_vec()),
            },
            ValueRef::Blob(b) => Value::Bytea(b.to_vec()),
        }
    }
}

impl Store for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<RowSet, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| (*c).to_string()).collect();

        let mut cursor = stmt.query(params_from_iter(params.iter()))?;
        let mut rows = Vec::new();
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(Self::read_value(row.get_ref(i)?));
            }
            rows.push(values);
        }

        Ok(RowSet { columns, rows })
    }

    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecOutcome, StoreError> {
        let rows_affected = self.conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(ExecOutcome {
            rows_affected,
            last_insert_id: self.conn.last_insert_rowid(),
        })
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::from(rusqlite::types::Null),
            Self::Boolean(b) => ToSqlOutput::from(i64::from(*b)),
            Self::Int(i) => ToSqlOutput::from(i64::from(*i)),
            Self::BigInt(i) => ToSqlOutput::from(*i),
            Self::Real(r) => ToSqlOutput::from(*r),
            Self::Text(s) => ToSqlOutput::from(s.as_str()),
            Self::Timestamp(t) => ToSqlOutput::from(t.format(TIMESTAMP_FORMAT).to_string()),
            Self::Uuid(u) => ToSqlOutput::from(u.to_string()),
            Self::Bytea(b) => ToSqlOutput::from(b.as_slice()),
        })
    }
}
