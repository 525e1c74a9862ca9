// PostgrustORM - typed records over a relational store without hand-written SQL
// Declarative filters, ordering, projection and limits; parameterized statements

// Clippy configuration - allow non-critical warnings
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::format_push_string)]
#![allow(clippy::clone_on_copy)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

// Core types (values, field types, record descriptors, errors)
pub mod core;

// Query construction (filters, ordering, predicates, statements, planning)
pub mod query;

// Statement execution (ORM operations, row materialization, schema guard)
pub mod executor;

// Store collaborator (trait, SQLite backend, configuration)
pub mod store;

// Re-export commonly used types for convenience
pub use self::core::{
    column_names, quote_identifier, table_name, to_snake_case, ErrorKind, FieldDescriptor,
    FieldType, FieldValue, OrmError, Record, RecordShape, Value,
};
pub use query::{Direction, Filter, FilterOp, FindArgs, OrderBy, UpdateSet};
pub use executor::Orm;
pub use store::{ExecOutcome, RowSet, SqliteStore, Store, StoreConfig, StoreError};
