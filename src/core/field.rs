use serde::Serialize;
use super::data_type::FieldType;
use super::naming::to_snake_case;

/// One declared field of a record type.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared (mixed-case) name used by filters, ordering and projection
    pub name: &'static str,
    pub field_type: FieldType,
    pub primary_key: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            primary_key: false,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Only names starting with an upper-case letter take part in mapping
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }

    /// Store-facing column name
    #[must_use]
    pub fn column_name(&self) -> String {
        to_snake_case(self.name)
    }
}
