//! Record type definitions and schema extraction.
//!
//! A [`TypeDefinition`] is the declarative description of a record type:
//! its name, whether it carries the table marker, and its fields with
//! their host type names and key markers. `#[derive(Record)]` from
//! `recordsql-derive` builds one at compile time; front ends may also
//! load them from files.
//!
//! ```rust
//! use recordsql_core::record::{FieldDefinition, TypeDefinition, extract_schema};
//!
//! let def = TypeDefinition::table("Page")
//!     .field(FieldDefinition::key("id", "i32"))
//!     .field(FieldDefinition::new("url", "String"));
//!
//! let table = extract_schema(&def).unwrap();
//! assert_eq!(table.element_list[0].data_type, "int");
//! assert_eq!(table.element_list[1].data_type, "text");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{Element, Table};
use crate::types::to_database_type;

/// One declared field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Column name.
    pub name: String,
    /// Host type name, e.g. `i32` or `String`.
    pub type_name: String,
    /// Whether the field carries the key marker.
    #[serde(default)]
    pub key: bool,
}

impl FieldDefinition {
    /// Creates an unmarked field.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            key: false,
        }
    }

    /// Creates a field carrying the key marker.
    #[must_use]
    pub fn key(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            key: true,
            ..Self::new(name, type_name)
        }
    }
}

/// Declarative description of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name; becomes the table name.
    pub name: String,
    /// Whether the type carries the table marker.
    #[serde(default)]
    pub table: bool,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    /// Starts a definition carrying the table marker.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: true,
            fields: Vec::new(),
        }
    }

    /// Starts a definition without the table marker.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            table: false,
            ..Self::table(name)
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// Implemented by record types that describe themselves.
///
/// Usually derived with `#[derive(Record)]`.
pub trait Record {
    /// Returns the definition of this type.
    fn type_definition() -> TypeDefinition;
}

/// Derives the declared [`Table`] of a type definition.
///
/// Returns `None` when the type carries no table marker; callers treat that
/// as "not persisted", not as a failure. Element order equals field order.
#[must_use]
pub fn extract_schema(definition: &TypeDefinition) -> Option<Table> {
    if !definition.table {
        debug!(type_name = %definition.name, "type has no table marker, skipping");
        return None;
    }

    let element_list = definition
        .fields
        .iter()
        .map(|field| Element {
            name: field.name.clone(),
            data_type: to_database_type(&field.type_name),
            is_key: field.key,
        })
        .collect();

    Some(Table {
        name: definition.name.clone(),
        element_list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmarked_type_is_not_a_table() {
        let def = TypeDefinition::plain("Settings").field(FieldDefinition::new("x", "i32"));
        assert!(extract_schema(&def).is_none());
    }

    #[test]
    fn fields_become_elements_in_order() {
        let def = TypeDefinition::table("Article")
            .field(FieldDefinition::key("id", "Int64"))
            .field(FieldDefinition::new("title", "String"))
            .field(FieldDefinition::new("score", "Double"))
            .field(FieldDefinition::new("crawled", "DateTime"));

        let table = extract_schema(&def).unwrap();
        assert_eq!(table.name, "Article");
        assert_eq!(
            table.element_list,
            vec![
                Element::key("id", "bigint"),
                Element::new("title", "text"),
                Element::new("score", "double"),
                Element::new("crawled", "datetime"),
            ]
        );
    }

    #[test]
    fn unknown_host_types_pass_through() {
        let def = TypeDefinition::table("Flags").field(FieldDefinition::new("enabled", "Bool"));
        let table = extract_schema(&def).unwrap();
        assert_eq!(table.element_list[0].data_type, "bool");
    }

    #[test]
    fn marked_type_without_fields_yields_empty_table() {
        let table = extract_schema(&TypeDefinition::table("Empty")).unwrap();
        assert!(table.element_list.is_empty());
    }

    #[test]
    fn definitions_load_from_json() {
        let def: TypeDefinition = serde_json::from_str(
            r#"{"name":"Page","table":true,"fields":[{"name":"id","type_name":"i32","key":true}]}"#,
        )
        .unwrap();
        assert_eq!(def, TypeDefinition::table("Page").field(FieldDefinition::key("id", "i32")));
    }
}
