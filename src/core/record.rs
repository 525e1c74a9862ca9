/// Record descriptors
///
/// A record type is one table row. Its shape comes from a static field list
/// generated by [`record!`](crate::record) instead of runtime reflection.

use super::error::OrmError;
use super::field::FieldDescriptor;
use super::naming::to_snake_case;
use super::value::Value;

/// A typed table row.
pub trait Record: Default {
    /// Bare type name; the table name is derived from it
    const TYPE_NAME: &'static str;

    /// Declared fields in declaration order
    const FIELDS: &'static [FieldDescriptor];

    /// Current value of the field with the given declared name
    fn field_value(&self, name: &str) -> Option<Value>;

    /// Overwrite the field with the given declared name.
    ///
    /// The value must already have the field's declared type.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), OrmError>;
}

/// Mapped view of a record type: visible fields in declared order plus the
/// primary key, if one is marked.
#[derive(Debug, Clone)]
pub struct RecordShape {
    pub type_name: &'static str,
    pub fields: Vec<&'static FieldDescriptor>,
    pub primary_key: Option<&'static FieldDescriptor>,
}

impl RecordShape {
    #[must_use]
    pub fn of<R: Record>() -> Self {
        let fields: Vec<&'static FieldDescriptor> =
            R::FIELDS.iter().filter(|f| f.is_visible()).collect();
        let primary_key = fields.iter().copied().find(|f| f.primary_key);

        Self {
            type_name: R::TYPE_NAME,
            fields,
            primary_key,
        }
    }

    #[must_use]
    pub fn table_name(&self) -> String {
        to_snake_case(self.type_name)
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.column_name()).collect()
    }

    /// Look up a visible field by declared name
    pub fn field(&self, name: &str) -> Result<&'static FieldDescriptor, OrmError> {
        self.fields
            .iter()
            .copied()
            .find(|f| f.name == name)
            .ok_or_else(|| OrmError::unknown_field(self.type_name, name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// Table name of a record type (`UserComment` -> `user_comment`)
#[must_use]
pub fn table_name<R: Record>() -> String {
    to_snake_case(R::TYPE_NAME)
}

/// Column names of a record type's visible fields, in declared order
#[must_use]
pub fn column_names<R: Record>() -> Vec<String> {
    RecordShape::of::<R>().column_names()
}

/// Declare a record struct together with its [`Record`] implementation.
///
/// Each field maps a declared name to a Rust field. Declared names that do
/// not start with an upper-case letter are kept on the struct but never
/// mapped to a column. `#[primary_key]` marks the identity field; any other
/// field attribute, doc comments included, is carried onto the struct.
///
/// ```
/// use postgrust_orm::record;
///
/// record! {
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub struct UserComment {
///         /// Assigned by the store on insert
///         #[primary_key]
///         "ID" => pub id: i64,
///         "UserName" => pub user_name: String,
///     }
/// }
///
/// assert_eq!(postgrust_orm::table_name::<UserComment>(), "user_comment");
/// assert_eq!(postgrust_orm::column_names::<UserComment>(), vec!["id", "user_name"]);
/// ```
#[macro_export]
macro_rules! record {
    // Is `primary_key` among the bracketed attribute bodies?
    (@primary_key) => { false };
    (@primary_key [primary_key] $($rest:tt)*) => { true };
    (@primary_key [$($other:tt)*] $($rest:tt)*) => {
        $crate::record!(@primary_key $($rest)*)
    };

    // Emit the struct once every field has been filtered
    (@fields { $($head:tt)* } [$($done:tt)*]) => {
        $($head)* { $($done)* }
    };
    // Field with no attributes left: emit it with the ones kept
    (@fields $head:tt [$($done:tt)*]
        ([] [$([$($kept:tt)*])*] { $field_vis:vis } $field:ident $ty:ty)
        $($rest:tt)*
    ) => {
        $crate::record!(@fields $head
            [$($done)* $(#[$($kept)*])* $field_vis $field: $ty,]
            $($rest)*
        );
    };
    // `primary_key` is consumed here, not emitted
    (@fields $head:tt $done:tt
        ([[primary_key] $($pending:tt)*] $kept:tt $vis:tt $field:ident $ty:ty)
        $($rest:tt)*
    ) => {
        $crate::record!(@fields $head $done
            ([$($pending)*] $kept $vis $field $ty)
            $($rest)*
        );
    };
    (@fields $head:tt $done:tt
        ([[$($attr:tt)*] $($pending:tt)*] [$($kept:tt)*] $vis:tt $field:ident $ty:ty)
        $($rest:tt)*
    ) => {
        $crate::record!(@fields $head $done
            ([$($pending)*] [$($kept)* [$($attr)*]] $vis $field $ty)
            $($rest)*
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($attr:tt)*])*
                $declared:literal => $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::record!(@fields { $(#[$meta])* $vis struct $name } []
            $( ([$([$($attr)*])*] [] { $field_vis } $field $ty) )*
        );

        impl $crate::Record for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            const FIELDS: &'static [$crate::FieldDescriptor] = &[
                $(
                    $crate::FieldDescriptor {
                        name: $declared,
                        field_type: <$ty as $crate::FieldValue>::FIELD_TYPE,
                        primary_key: $crate::record!(@primary_key $([$($attr)*])*),
                    },
                )*
            ];

            fn field_value(&self, name: &str) -> Option<$crate::Value> {
                match name {
                    $( $declared => Some($crate::FieldValue::to_value(&self.$field)), )*
                    _ => None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> Result<(), $crate::OrmError> {
                match name {
                    $(
                        $declared => {
                            let found = value
                                .field_type()
                                .map_or_else(|| "NULL".to_string(), |t| t.to_string());
                            self.$field = <$ty as $crate::FieldValue>::from_value(value)
                                .ok_or_else(|| $crate::OrmError::TypeMismatch {
                                    field: name.to_string(),
                                    expected: <$ty as $crate::FieldValue>::FIELD_TYPE,
                                    found,
                                })?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::OrmError::UnknownField {
                        record: stringify!($name),
                        field: name.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data_type::FieldType;

    crate::record! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct UserComment {
            #[primary_key]
            "ID" => id: i64,
            "UserName" => user_name: String,
            "cacheKey" => cache_key: String,
            "Posted" => posted: chrono::NaiveDateTime,
        }
    }

    crate::record! {
        /// Audit entry
        #[derive(Debug, Clone, Default, PartialEq)]
        struct AuditEntry {
            /// Store-assigned identity
            #[allow(clippy::struct_field_names)]
            #[primary_key]
            "EntryID" => entry_id: i64,
            /// Who made the change
            "Actor" => actor: String,
            #[allow(dead_code)]
            "note" => note: String,
        }
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name::<UserComment>(), "user_comment");
        assert_eq!(table_name::<UserComment>(), table_name::<UserComment>());
    }

    #[test]
    fn test_column_names_skip_hidden_fields() {
        assert_eq!(column_names::<UserComment>(), vec!["id", "user_name", "posted"]);
    }

    #[test]
    fn test_shape() {
        let shape = RecordShape::of::<UserComment>();
        assert_eq!(shape.field_names(), vec!["ID", "UserName", "Posted"]);
        assert_eq!(shape.primary_key.map(|f| f.name), Some("ID"));
        assert_eq!(shape.field("Posted").unwrap().field_type, FieldType::Timestamp);
        assert!(!shape.contains("cacheKey"));
        assert!(matches!(
            shape.field("Missing"),
            Err(OrmError::UnknownField { record: "UserComment", .. })
        ));
    }

    #[test]
    fn test_field_access() {
        let mut comment = UserComment::default();
        comment.set_field("UserName", Value::from("alevy")).unwrap();
        comment.set_field("ID", Value::BigInt(9)).unwrap();

        assert_eq!(comment.user_name, "alevy");
        assert_eq!(comment.field_value("ID"), Some(Value::BigInt(9)));
        assert_eq!(comment.field_value("Nope"), None);
        assert!(matches!(
            comment.set_field("ID", Value::from("nine")),
            Err(OrmError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_field_attributes_are_accepted() {
        let shape = RecordShape::of::<AuditEntry>();
        assert_eq!(shape.field_names(), vec!["EntryID", "Actor"]);
        assert_eq!(shape.primary_key.map(|f| f.name), Some("EntryID"));
        assert!(!AuditEntry::FIELDS[1].primary_key);
        assert_eq!(table_name::<AuditEntry>(), "audit_entry");

        let entry = AuditEntry {
            entry_id: 3,
            actor: "nick".to_string(),
            note: String::new(),
        };
        assert_eq!(entry.field_value("Actor"), Some(Value::from("nick")));
    }
}
