/// Predicate building for WHERE clauses
///
/// Turns a [`Filter`] into validated conditions and renders them as
/// placeholder SQL with a parallel, ordered parameter list.

use crate::core::{quote_identifier, OrmError, RecordShape, Value};
use super::filter::{Filter, FilterOp, Operand};

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: FilterOp,
    pub operand: Operand,
}

impl Condition {
    fn render_into(&self, sql: &mut String, params: &mut Vec<Value>) {
        let column = quote_identifier(&self.column);
        match &self.operand {
            Operand::Scalar(value) => {
                sql.push_str(&format!("{column} {} ?", self.op.sql_token()));
                params.push(value.clone());
            }
            Operand::List(values) => {
                let placeholders = vec!["?"; values.len()].join(", ");
                sql.push_str(&format!("{column} {} ({placeholders})", self.op.sql_token()));
                params.extend(values.iter().cloned());
            }
        }
    }
}

/// Conjunction of conditions; empty means every row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub conditions: Vec<Condition>,
}

impl Predicate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append ` WHERE c1 AND c2 ...`, or nothing when empty
    pub fn render_into(&self, sql: &mut String, params: &mut Vec<Value>) {
        for (i, condition) in self.conditions.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            condition.render_into(sql, params);
        }
    }
}

pub struct PredicateBuilder<'a> {
    shape: &'a RecordShape,
}

impl<'a> PredicateBuilder<'a> {
    #[must_use]
    pub const fn new(shape: &'a RecordShape) -> Self {
        Self { shape }
    }

    /// Validate every (field, operator, operand) triple and translate it.
    ///
    /// Fails on the first unknown field, unknown operator code, or operand
    /// whose shape does not fit the operator.
    pub fn build(&self, filter: &Filter) -> Result<Predicate, OrmError> {
        let mut conditions = Vec::new();

        for (field, code, operand) in filter.iter() {
            let descriptor = self.shape.field(field)?;
            let op: FilterOp = code.parse()?;

            match (op.takes_list(), operand) {
                (true, Operand::List(_)) | (false, Operand::Scalar(_)) => {}
                (true, Operand::Scalar(_)) => {
                    return Err(Self::bad_operand(field, op, "a list of values"));
                }
                (false, Operand::List(_)) => {
                    return Err(Self::bad_operand(field, op, "a single value"));
                }
            }

            conditions.push(Condition {
                column: descriptor.column_name(),
                op,
                operand: operand.clone(),
            });
        }

        Ok(Predicate { conditions })
    }

    fn bad_operand(field: &str, op: FilterOp, expected: &'static str) -> OrmError {
        OrmError::InvalidOperand {
            field: field.to_string(),
            op: op.code().to_string(),
            expected,
        }
    }
}
