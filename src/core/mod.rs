// Module declarations
pub mod error;
pub mod value;
pub mod data_type;
pub mod field;
pub mod naming;
pub mod record;

// Re-exports for convenience
pub use error::{ErrorKind, OrmError};
pub use value::{FieldValue, Value};
pub use data_type::FieldType;
pub use field::FieldDescriptor;
pub use naming::{quote_identifier, to_snake_case};
pub use record::{column_names, table_name, Record, RecordShape};
