/// Row materialization
///
/// Maps result rows back onto freshly constructed records. Column `i` of each
/// row belongs to selected field `i`; unselected fields keep their zero value.
/// The result's column names must match the selected fields' column names in
/// order, so a table laid out differently from its record fails instead of
/// filling the wrong fields.

use crate::core::{FieldDescriptor, FieldType, OrmError, Record};
use crate::store::{RowSet, StoreError};

/// Scan target for one selected column
#[derive(Debug, Clone)]
struct ScanTarget {
    field: &'static str,
    column: String,
    field_type: FieldType,
}

pub struct RowMaterializer {
    targets: Vec<ScanTarget>,
}

impl RowMaterializer {
    #[must_use]
    pub fn new(selected: &[&'static FieldDescriptor]) -> Self {
        let targets = selected
            .iter()
            .map(|f| ScanTarget {
                field: f.name,
                column: f.column_name(),
                field_type: f.field_type,
            })
            .collect();
        Self { targets }
    }

    /// Build one record per row, preserving row order. Any row that does not
    /// fit the scan targets fails the whole call.
    pub fn materialize<R: Record>(&self, rows: RowSet) -> Result<Vec<R>, OrmError> {
        self.check_columns(&rows.columns)?;
        let mut records = Vec::with_capacity(rows.len());

        for row in rows.rows {
            if row.len() != self.targets.len() {
                return Err(StoreError::ColumnCount {
                    expected: self.targets.len(),
                    found: row.len(),
                }
                .into());
            }

            let mut record = R::default();
            for (target, raw) in self.targets.iter().zip(row) {
                let found = raw.field_type().map_or_else(|| "NULL".to_string(), |t| t.to_string());
                let value = target.field_type.scan(raw).ok_or_else(|| StoreError::Scan {
                    column: target.field.to_string(),
                    expected: target.field_type,
                    found,
                })?;
                record.set_field(target.field, value)?;
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Column names are compared case-insensitively, as SQL identifiers are
    fn check_columns(&self, columns: &[String]) -> Result<(), StoreError> {
        if columns.len() != self.targets.len() {
            return Err(StoreError::ColumnCount {
                expected: self.targets.len(),
                found: columns.len(),
            });
        }

        let matches = self
            .targets
            .iter()
            .zip(columns)
            .all(|(target, column)| target.column.eq_ignore_ascii_case(column));
        if !matches {
            return Err(StoreError::ColumnMismatch {
                expected: self.targets.iter().map(|t| t.column.clone()).collect(),
                found: columns.to_vec(),
            });
        }

        Ok(())
    }
}
