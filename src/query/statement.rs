use crate::core::{quote_identifier, Value};
use super::order::Direction;
use super::predicate::Predicate;

/// A planned statement, fully validated; rendering cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select {
        /// `None` selects `*`
        columns: Option<Vec<String>>,
        from: String,
        filter: Predicate,
        order_by: Vec<(String, Direction)>,
        limit: Option<u64>,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<Value>,
    },
    Update {
        table: String,
        assignments: Vec<(String, Value)>,
        filter: Predicate,
    },
    Delete {
        from: String,
        filter: Predicate,
    },
}

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Select { from, .. } | Self::Delete { from, .. } => from,
            Self::Insert { table, .. } | Self::Update { table, .. } => table,
        }
    }

    /// Render to SQL. Clause order for SELECT is fixed:
    /// projection, source, filter, ordering, limit. Every table and column
    /// name is quoted.
    #[must_use]
    pub fn render(&self) -> RenderedStatement {
        let mut params = Vec::new();

        let sql = match self {
            Self::Select {
                columns,
                from,
                filter,
                order_by,
                limit,
            } => {
                let projection = columns
                    .as_ref()
                    .map_or_else(|| "*".to_string(), |cols| quote_list(cols));
                let mut sql = format!("SELECT {projection} FROM {}", quote_identifier(from));
                filter.render_into(&mut sql, &mut params);

                if !order_by.is_empty() {
                    let keys: Vec<String> = order_by
                        .iter()
                        .map(|(col, dir)| format!("{} {}", quote_identifier(col), dir.as_sql()))
                        .collect();
                    sql.push_str(" ORDER BY ");
                    sql.push_str(&keys.join(", "));
                }

                if let Some(n) = limit {
                    sql.push_str(&format!(" LIMIT {n}"));
                }
                sql
            }
            Self::Insert {
                table,
                columns,
                values,
            } => {
                params.extend(values.iter().cloned());
                let table = quote_identifier(table);
                if columns.is_empty() {
                    format!("INSERT INTO {table} DEFAULT VALUES")
                } else {
                    let placeholders = vec!["?"; values.len()].join(", ");
                    format!("INSERT INTO {table}({}) VALUES({placeholders})", quote_list(columns))
                }
            }
            Self::Update {
                table,
                assignments,
                filter,
            } => {
                let sets: Vec<String> = assignments
                    .iter()
                    .map(|(col, value)| {
                        params.push(value.clone());
                        format!("{} = ?", quote_identifier(col))
                    })
                    .collect();
                let mut sql = format!("UPDATE {} SET {}", quote_identifier(table), sets.join(", "));
                filter.render_into(&mut sql, &mut params);
                sql
            }
            Self::Delete { from, filter } => {
                let mut sql = format!("DELETE FROM {}", quote_identifier(from));
                filter.render_into(&mut sql, &mut params);
                sql
            }
        };

        RenderedStatement { sql, params }
    }
}

fn quote_list(names: &[String]) -> String {
    names.iter().map(|n| quote_identifier(n)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter::{FilterOp, Operand};
    use crate::query::predicate::Condition;

    fn age_over(n: i32) -> Predicate {
        Predicate {
            conditions: vec![Condition {
                column: "age".to_string(),
                op: FilterOp::Gt,
                operand: Operand::Scalar(Value::Int(n)),
            }],
        }
    }

    #[test]
    fn test_select_all() {
        let stmt = Statement::Select {
            columns: None,
            from: "user".to_string(),
            filter: Predicate::default(),
            order_by: vec![],
            limit: None,
        };
        assert_eq!(stmt.render().sql, r#"SELECT * FROM "user""#);
        assert_eq!(stmt.table(), "user");
    }

    #[test]
    fn test_select_clause_order() {
        let stmt = Statement::Select {
            columns: Some(vec!["full_name".to_string(), "age".to_string()]),
            from: "user".to_string(),
            filter: age_over(18),
            order_by: vec![
                ("age".to_string(), Direction::Desc),
                ("full_name".to_string(), Direction::Asc),
            ],
            limit: Some(2),
        };
        let rendered = stmt.render();
        assert_eq!(
            rendered.sql,
            r#"SELECT "full_name", "age" FROM "user" WHERE "age" > ? ORDER BY "age" DESC, "full_name" ASC LIMIT 2"#
        );
        assert_eq!(rendered.params, vec![Value::Int(18)]);
    }

    #[test]
    fn test_insert() {
        let stmt = Statement::Insert {
            table: "post".to_string(),
            columns: vec!["author".to_string(), "likes".to_string()],
            values: vec![Value::from("alevy"), Value::BigInt(0)],
        };
        let rendered = stmt.render();
        assert_eq!(rendered.sql, r#"INSERT INTO "post"("author", "likes") VALUES(?, ?)"#);
        assert_eq!(rendered.params.len(), 2);

        let empty = Statement::Insert {
            table: "counter".to_string(),
            columns: vec![],
            values: vec![],
        };
        assert_eq!(empty.render().sql, r#"INSERT INTO "counter" DEFAULT VALUES"#);
    }

    #[test]
    fn test_update_params_precede_filter_params() {
        let stmt = Statement::Update {
            table: "user".to_string(),
            assignments: vec![
                ("class_year".to_string(), Value::from("Senior")),
                ("age".to_string(), Value::BigInt(21)),
            ],
            filter: age_over(20),
        };
        let rendered = stmt.render();
        assert_eq!(rendered.sql, r#"UPDATE "user" SET "class_year" = ?, "age" = ? WHERE "age" > ?"#);
        assert_eq!(
            rendered.params,
            vec![Value::from("Senior"), Value::BigInt(21), Value::Int(20)]
        );
    }

    #[test]
    fn test_delete() {
        let all = Statement::Delete {
            from: "user".to_string(),
            filter: Predicate::default(),
        };
        assert_eq!(all.render().sql, r#"DELETE FROM "user""#);

        let some = Statement::Delete {
            from: "user".to_string(),
            filter: age_over(30),
        };
        assert_eq!(some.render().sql, r#"DELETE FROM "user" WHERE "age" > ?"#);
    }
}
