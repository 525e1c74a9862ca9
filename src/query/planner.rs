/// Query planning
///
/// Validates caller-supplied projection, filter, ordering and update sets
/// against a record shape and produces a [`Statement`]. Nothing is emitted
/// until every field reference has been checked.

use std::collections::BTreeMap;
use crate::core::{FieldDescriptor, OrmError, Record, RecordShape, Value};
use super::filter::Filter;
use super::order::{Direction, OrderBy};
use super::predicate::PredicateBuilder;
use super::statement::Statement;

/// Arguments for `find`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindArgs {
    /// Declared field names to return; empty means all fields
    pub projection: Vec<String>,
    pub filter: Filter,
    pub order_by: OrderBy,
    /// Row cap; zero or negative means unbounded
    pub limit: i64,
}

impl FindArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn project<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

/// New values for `update`, keyed by declared field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    values: BTreeMap<String, Value>,
}

impl UpdateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add(field, value);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(f, v)| (f.as_str(), v))
    }
}

/// Planned SELECT plus the fields its columns map back to, positionally
#[derive(Debug, Clone)]
pub struct FindPlan {
    pub statement: Statement,
    pub selected: Vec<&'static FieldDescriptor>,
}

pub struct QueryPlanner {
    shape: RecordShape,
}

impl QueryPlanner {
    #[must_use]
    pub const fn new(shape: RecordShape) -> Self {
        Self { shape }
    }

    #[must_use]
    pub fn for_record<R: Record>() -> Self {
        Self::new(RecordShape::of::<R>())
    }

    #[must_use]
    pub const fn shape(&self) -> &RecordShape {
        &self.shape
    }

    #[must_use]
    pub fn table_name(&self) -> String {
        self.shape.table_name()
    }

    pub fn plan_find(&self, args: &FindArgs) -> Result<FindPlan, OrmError> {
        let selected = self.resolve_projection(&args.projection)?;
        let filter = PredicateBuilder::new(&self.shape).build(&args.filter)?;
        let order_by = self.resolve_ordering(&args.order_by)?;

        let columns = if args.projection.is_empty() {
            None
        } else {
            Some(selected.iter().map(|f| f.column_name()).collect())
        };
        let limit = u64::try_from(args.limit).ok().filter(|n| *n > 0);

        Ok(FindPlan {
            statement: Statement::Select {
                columns,
                from: self.table_name(),
                filter,
                order_by,
                limit,
            },
            selected,
        })
    }

    /// INSERT of every visible field except the primary key
    pub fn plan_insert<R: Record>(&self, record: &R) -> Statement {
        let mut columns = Vec::new();
        let mut values = Vec::new();

        for field in self.shape.fields.iter().filter(|f| !f.primary_key) {
            columns.push(field.column_name());
            values.push(record.field_value(field.name).unwrap_or(Value::Null));
        }

        Statement::Insert {
            table: self.table_name(),
            columns,
            values,
        }
    }

    pub fn plan_delete(&self, filter: &Filter) -> Result<Statement, OrmError> {
        let filter = PredicateBuilder::new(&self.shape).build(filter)?;
        Ok(Statement::Delete {
            from: self.table_name(),
            filter,
        })
    }

    /// Every update value must carry exactly the declared field type
    pub fn plan_update(&self, filter: &Filter, updates: &UpdateSet) -> Result<Statement, OrmError> {
        let mut assignments = Vec::new();
        for (name, value) in updates.iter() {
            let field = self.shape.field(name)?;
            if value.field_type() != Some(field.field_type) {
                return Err(OrmError::TypeMismatch {
                    field: name.to_string(),
                    expected: field.field_type,
                    found: value
                        .field_type()
                        .map_or_else(|| "NULL".to_string(), |t| t.to_string()),
                });
            }
            assignments.push((field.column_name(), value.clone()));
        }

        let filter = PredicateBuilder::new(&self.shape).build(filter)?;
        Ok(Statement::Update {
            table: self.table_name(),
            assignments,
            filter,
        })
    }

    /// Selected fields in declared order; all visible fields when empty.
    /// Duplicate names collapse into one column.
    fn resolve_projection(&self, projection: &[String]) -> Result<Vec<&'static FieldDescriptor>, OrmError> {
        for name in projection {
            self.shape.field(name)?;
        }

        Ok(self
            .shape
            .fields
            .iter()
            .copied()
            .filter(|f| projection.is_empty() || projection.iter().any(|p| p == f.name))
            .collect())
    }

    fn resolve_ordering(&self, order_by: &OrderBy) -> Result<Vec<(String, Direction)>, OrmError> {
        order_by
            .iter()
            .map(|(name, direction)| -> Result<(String, Direction), OrmError> {
                let field = self.shape.field(name)?;
                let direction: Direction = direction.parse()?;
                Ok((field.column_name(), direction))
            })
            .collect()
    }
}
