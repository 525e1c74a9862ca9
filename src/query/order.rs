use std::str::FromStr;
use crate::core::OrmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = OrmError;

    /// Only the exact literals `ASC` and `DESC` are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(OrmError::InvalidDirection(other.to_string())),
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_sql().to_string()
    }
}

/// Sort keys, primary first; validated when the query is planned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    keys: Vec<(String, String)>,
}

impl OrderBy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, direction: impl Into<String>) -> &mut Self {
        self.keys.push((field.into(), direction.into()));
        self
    }

    #[must_use]
    pub fn then(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.add(field, direction);
        self
    }

    #[must_use]
    pub fn asc(self, field: impl Into<String>) -> Self {
        self.then(field, Direction::Asc)
    }

    #[must_use]
    pub fn desc(self, field: impl Into<String>) -> Self {
        self.then(field, Direction::Desc)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().map(|(f, d)| (f.as_str(), d.as_str()))
    }
}
