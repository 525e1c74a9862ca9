use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::value::Value;

/// Timestamp layouts accepted when scanning text columns, most specific first.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldType {
    Boolean,
    Int,      // i32
    BigInt,   // i64
    Real,
    Text,
    Timestamp,
    Uuid,
    Bytea,
}

impl FieldType {
    /// Value an unselected or NULL field holds after materialization
    #[must_use]
    pub fn zero_value(self) -> Value {
        match self {
            Self::Boolean => Value::Boolean(false),
            Self::Int => Value::Int(0),
            Self::BigInt => Value::BigInt(0),
            Self::Real => Value::Real(0.0),
            Self::Text => Value::Text(String::new()),
            Self::Timestamp => Value::Timestamp(NaiveDateTime::default()),
            Self::Uuid => Value::Uuid(Uuid::nil()),
            Self::Bytea => Value::Bytea(Vec::new()),
        }
    }

    /// Coerce a raw store value into this field type.
    ///
    /// Stores hand back their native representation (SQLite: integer, real,
    /// text, blob). Returns `None` when the value has no sensible reading as
    /// this type.
    #[must_use]
    pub fn scan(self, raw: Value) -> Option<Value> {
        if matches!(raw, Value::Null) {
            return Some(self.zero_value());
        }

        match (self, raw) {
            (Self::Boolean, Value::Boolean(b)) => Some(Value::Boolean(b)),
            (Self::Boolean, Value::BigInt(n)) => Some(Value::Boolean(n != 0)),
            (Self::Boolean, Value::Int(n)) => Some(Value::Boolean(n != 0)),
            (Self::Boolean, Value::Text(s)) => match s.as_str() {
                "1" | "t" | "true" | "TRUE" => Some(Value::Boolean(true)),
                "0" | "f" | "false" | "FALSE" => Some(Value::Boolean(false)),
                _ => None,
            },

            (Self::Int, Value::Int(n)) => Some(Value::Int(n)),
            (Self::Int, Value::BigInt(n)) => i32::try_from(n).ok().map(Value::Int),
            (Self::Int, Value::Boolean(b)) => Some(Value::Int(i32::from(b))),
            (Self::Int, Value::Text(s)) => s.trim().parse().ok().map(Value::Int),

            (Self::BigInt, Value::BigInt(n)) => Some(Value::BigInt(n)),
            (Self::BigInt, Value::Int(n)) => Some(Value::BigInt(i64::from(n))),
            (Self::BigInt, Value::Boolean(b)) => Some(Value::BigInt(i64::from(b))),
            (Self::BigInt, Value::Text(s)) => s.trim().parse().ok().map(Value::BigInt),

            (Self::Real, Value::Real(r)) => Some(Value::Real(r)),
            (Self::Real, Value::BigInt(n)) => Some(Value::Real(n as f64)),
            (Self::Real, Value::Int(n)) => Some(Value::Real(f64::from(n))),
            (Self::Real, Value::Text(s)) => s.trim().parse().ok().map(Value::Real),

            (Self::Text, Value::Text(s)) => Some(Value::Text(s)),
            (Self::Text, Value::Bytea(b)) => String::from_utf8(b).ok().map(Value::Text),
            (Self::Text, other @ (Value::Int(_) | Value::BigInt(_) | Value::Real(_) | Value::Boolean(_))) => {
                Some(Value::Text(other.to_string()))
            }

            (Self::Timestamp, Value::Timestamp(t)) => Some(Value::Timestamp(t)),
            (Self::Timestamp, Value::Text(s)) => parse_timestamp(&s).map(Value::Timestamp),
            (Self::Timestamp, Value::BigInt(secs)) => {
                DateTime::from_timestamp(secs, 0).map(|dt| Value::Timestamp(dt.naive_utc()))
            }

            (Self::Uuid, Value::Uuid(u)) => Some(Value::Uuid(u)),
            (Self::Uuid, Value::Text(s)) => Uuid::parse_str(&s).ok().map(Value::Uuid),
            (Self::Uuid, Value::Bytea(b)) => Uuid::from_slice(&b).ok().map(Value::Uuid),

            (Self::Bytea, Value::Bytea(b)) => Some(Value::Bytea(b)),
            (Self::Bytea, Value::Text(s)) => Some(Value::Bytea(s.into_bytes())),

            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "bool",
            Self::Int => "i32",
            Self::BigInt => "i64",
            Self::Real => "f64",
            Self::Text => "String",
            Self::Timestamp => "NaiveDateTime",
            Self::Uuid => "Uuid",
            Self::Bytea => "Vec<u8>",
        };
        write!(f, "{name}")
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
