/// Query construction
///
/// Structure:
/// - filter: field -> operator -> operand conditions
/// - order: sort keys and directions
/// - predicate: validated WHERE conditions with positional parameters
/// - statement: SELECT/INSERT/UPDATE/DELETE and SQL rendering
/// - planner: validation of find/create/update/delete arguments against a record shape

pub mod filter;
pub mod order;
pub mod predicate;
pub mod statement;
pub mod planner;

pub use filter::{Filter, FilterOp, Operand};
pub use order::{Direction, OrderBy};
pub use predicate::{Condition, Predicate, PredicateBuilder};
pub use statement::{RenderedStatement, Statement};
pub use planner::{FindArgs, FindPlan, QueryPlanner, UpdateSet};
