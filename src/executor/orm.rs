/// Public ORM operations: find, create, delete, update.
///
/// Each call runs validate -> plan -> schema guard -> execute -> materialize
/// to completion. Validation never touches the store, so a bad field,
/// operator, direction or update type fails before any statement is issued.

use crate::core::{OrmError, Record, Value};
use crate::query::{Filter, FindArgs, QueryPlanner, RenderedStatement, UpdateSet};
use crate::store::Store;
use super::materializer::RowMaterializer;
use super::schema_guard::SchemaGuard;

pub struct Orm<S: Store> {
    store: S,
}

impl<S: Store> Orm<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Close the ORM and hand the store back
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Every row of `R`'s table, in store order
    pub fn find_all<R: Record>(&self) -> Result<Vec<R>, OrmError> {
        self.find(&FindArgs::default())
    }

    pub fn find<R: Record>(&self, args: &FindArgs) -> Result<Vec<R>, OrmError> {
        let planner = QueryPlanner::for_record::<R>();
        let plan = planner.plan_find(args)?;
        SchemaGuard::ensure_table(&self.store, plan.statement.table())?;

        let rendered = plan.statement.render();
        Self::trace("find", plan.statement.table(), &rendered);
        let rows = self.store.query(&rendered.sql, &rendered.params)?;

        RowMaterializer::new(&plan.selected).materialize(rows)
    }

    /// Insert `record`. When `R` has a primary key, its value is ignored on
    /// insert and overwritten with the identity the store assigned.
    pub fn create<R: Record>(&self, record: &mut R) -> Result<(), OrmError> {
        let planner = QueryPlanner::for_record::<R>();
        let table = planner.table_name();
        SchemaGuard::ensure_table(&self.store, &table)?;

        let rendered = planner.plan_insert(record).render();
        Self::trace("create", &table, &rendered);
        let outcome = self.store.execute(&rendered.sql, &rendered.params)?;

        if let Some(pk) = planner.shape().primary_key {
            let identity = pk.field_type.scan(Value::BigInt(outcome.last_insert_id)).ok_or_else(|| {
                OrmError::TypeMismatch {
                    field: pk.name.to_string(),
                    expected: pk.field_type,
                    found: "i64".to_string(),
                }
            })?;
            record.set_field(pk.name, identity)?;
        }

        Ok(())
    }

    /// Delete rows matching `filter` (all rows when empty); returns the count
    pub fn delete<R: Record>(&self, filter: &Filter) -> Result<usize, OrmError> {
        let planner = QueryPlanner::for_record::<R>();
        let statement = planner.plan_delete(filter)?;
        SchemaGuard::ensure_table(&self.store, statement.table())?;

        let rendered = statement.render();
        Self::trace("delete", statement.table(), &rendered);
        Ok(self.store.execute(&rendered.sql, &rendered.params)?.rows_affected)
    }

    /// Apply `updates` to rows matching `filter`; returns the count.
    ///
    /// An empty update set changes nothing and reports 0.
    pub fn update<R: Record>(&self, filter: &Filter, updates: &UpdateSet) -> Result<usize, OrmError> {
        let planner = QueryPlanner::for_record::<R>();
        let statement = planner.plan_update(filter, updates)?;
        SchemaGuard::ensure_table(&self.store, statement.table())?;

        if updates.is_empty() {
            return Ok(0);
        }

        let rendered = statement.render();
        Self::trace("update", statement.table(), &rendered);
        Ok(self.store.execute(&rendered.sql, &rendered.params)?.rows_affected)
    }

    fn trace(op: &str, table: &str, rendered: &RenderedStatement) {
        tracing::debug!(
            op,
            table = %table,
            sql = %rendered.sql,
            params = rendered.params.len(),
            "executing statement"
        );
    }
}
