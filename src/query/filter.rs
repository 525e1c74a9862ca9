use std::collections::BTreeMap;
use std::str::FromStr;
use crate::core::{OrmError, Value};

/// Comparison operator of a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterOp {
    Lt,
    Gt,
    Eq,
    Neq,
    Leq,
    Geq,
    In,
    Nin,
}

impl FilterOp {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Leq => "leq",
            Self::Geq => "geq",
            Self::In => "in",
            Self::Nin => "nin",
        }
    }

    /// SQL comparator token
    #[must_use]
    pub const fn sql_token(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Leq => "<=",
            Self::Geq => ">=",
            Self::In => "IN",
            Self::Nin => "NOT IN",
        }
    }

    /// `in` / `nin` take a list operand, everything else a scalar
    #[must_use]
    pub const fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::Nin)
    }
}

impl FromStr for FilterOp {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lt" => Ok(Self::Lt),
            "gt" => Ok(Self::Gt),
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "leq" => Ok(Self::Leq),
            "geq" => Ok(Self::Geq),
            "in" => Ok(Self::In),
            "nin" => Ok(Self::Nin),
            other => Err(OrmError::InvalidOperator(other.to_string())),
        }
    }
}

impl From<FilterOp> for String {
    fn from(op: FilterOp) -> Self {
        op.code().to_string()
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(Value),
    List(Vec<Value>),
}

/// Conjunction of per-field conditions.
///
/// Maps declared field name -> operator code -> operand. Operator codes are
/// kept as given and only parsed when the predicate is built, so an unknown
/// code fails the call that uses the filter. Both levels are sorted, which
/// makes rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: BTreeMap<String, BTreeMap<String, Operand>>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar condition; a second condition with the same operator on
    /// the same field replaces the first
    pub fn add(&mut self, field: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.insert(field.into(), op.into(), Operand::Scalar(value.into()))
    }

    /// Add a set-membership condition (`in` / `nin`)
    pub fn add_list<I, V>(&mut self, field: impl Into<String>, op: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.insert(field.into(), op.into(), Operand::List(list))
    }

    /// Builder form of [`add`](Self::add)
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add(field, op, value);
        self
    }

    /// Builder form of [`add_list`](Self::add_list)
    #[must_use]
    pub fn with_list<I, V>(mut self, field: impl Into<String>, op: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add_list(field, op, values);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// (field, operator code, operand) triples in rendering order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Operand)> {
        self.conditions.iter().flat_map(|(field, ops)| {
            ops.iter()
                .map(move |(op, operand)| (field.as_str(), op.as_str(), operand))
        })
    }

    fn insert(&mut self, field: String, op: String, operand: Operand) -> &mut Self {
        self.conditions.entry(field).or_default().insert(op, operand);
        self
    }
}
