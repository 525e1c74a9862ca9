use crate::core::OrmError;
use crate::store::Store;

/// Confirms a table is reachable before anything reads or mutates it
pub struct SchemaGuard;

impl SchemaGuard {
    /// Probe `table`. A missing table is [`OrmError::TableNotFound`]; any other
    /// probe failure passes through as [`OrmError::Execution`].
    pub fn ensure_table<S: Store + ?Sized>(store: &S, table: &str) -> Result<(), OrmError> {
        match store.probe_table(table) {
            Ok(()) => Ok(()),
            Err(err) if err.is_missing_table() => {
                tracing::warn!(table = %table, error = %err, "table not found");
                Err(OrmError::TableNotFound(table.to_string()))
            }
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "table probe failed");
                Err(err.into())
            }
        }
    }
}
