/// Executor module - runs planned statements against a store
///
/// Structure:
/// - orm: public find/create/delete/update operations
/// - materializer: result rows -> typed records
/// - schema_guard: table existence check before reads and writes

pub mod orm;
pub mod materializer;
pub mod schema_guard;

pub use orm::Orm;
pub use materializer::RowMaterializer;
pub use schema_guard::SchemaGuard;
