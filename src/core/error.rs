use thiserror::Error;
use super::data_type::FieldType;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum OrmError {
    #[error("Table '{0}' not found")]
    TableNotFound(String),
    #[error("Field '{field}' does not exist on record '{record}'")]
    UnknownField { record: &'static str, field: String },
    #[error("Invalid filter operator '{0}'")]
    InvalidOperator(String),
    #[error("Operator '{op}' on field '{field}' expects {expected}")]
    InvalidOperand {
        field: String,
        op: String,
        expected: &'static str,
    },
    #[error("Invalid sort direction '{0}', expected ASC or DESC")]
    InvalidDirection(String),
    #[error("Type of field '{field}' in update is {found} but should be {expected}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },
    #[error("Execution failed: {0}")]
    Execution(#[from] StoreError),
}

/// Failure class of an [`OrmError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaMismatch,
    InvalidFieldReference,
    InvalidOperatorOrDirection,
    TypeMismatch,
    ExecutionFailure,
}

impl OrmError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TableNotFound(_) => ErrorKind::SchemaMismatch,
            Self::UnknownField { .. } => ErrorKind::InvalidFieldReference,
            Self::InvalidOperator(_) | Self::InvalidOperand { .. } | Self::InvalidDirection(_) => {
                ErrorKind::InvalidOperatorOrDirection
            }
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Execution(_) => ErrorKind::ExecutionFailure,
        }
    }

    pub(crate) fn unknown_field(record: &'static str, field: &str) -> Self {
        Self::UnknownField {
            record,
            field: field.to_string(),
        }
    }
}
