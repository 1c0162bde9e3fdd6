//! Table descriptors.
//!
//! [`Table`] and [`Element`] describe the declared schema of a record
//! type. [`LiveColumn`] is one row of the live schema as reported by a
//! database driver.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{extract_schema, Record};

/// One column of a declared table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    /// Column name.
    pub name: String,
    /// Database type name, as produced by the type mapper.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub is_key: bool,
}

impl Element {
    /// Creates a non-key element.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_key: false,
        }
    }

    /// Creates a key element.
    #[must_use]
    pub fn key(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            is_key: true,
            ..Self::new(name, data_type)
        }
    }
}

/// A declared table: a name and its columns in declaration order.
///
/// Column order drives `AFTER` placement when columns are added to an
/// existing table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    #[serde(rename = "elements")]
    pub element_list: Vec<Element>,
}

impl Table {
    /// Creates a table without columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_list: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn element(mut self, element: Element) -> Self {
        self.element_list.push(element);
        self
    }

    /// Extracts the table of a derived record type, or `None` when the
    /// type carries no table marker.
    #[must_use]
    pub fn of<T: Record>() -> Option<Self> {
        extract_schema(&T::type_definition())
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.element_list.iter().find(|e| e.name == name)
    }

    /// Iterates over key columns in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &Element> {
        self.element_list.iter().filter(|e| e.is_key)
    }

    /// Iterates over non-key columns in declaration order.
    pub fn non_keys(&self) -> impl Iterator<Item = &Element> {
        self.element_list.iter().filter(|e| !e.is_key)
    }

    /// Returns `true` if at least one column is a key.
    #[must_use]
    pub fn has_key(&self) -> bool {
        self.element_list.iter().any(|e| e.is_key)
    }

    /// Checks that every column has a non-empty name and that no two
    /// columns share one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTable`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(self.invalid("table name is empty".to_string()));
        }
        let mut seen = BTreeSet::new();
        for (index, element) in self.element_list.iter().enumerate() {
            if element.name.is_empty() {
                return Err(self.invalid(format!("element #{index} has an empty name")));
            }
            if !seen.insert(element.name.as_str()) {
                return Err(self.invalid(format!("duplicate element name '{}'", element.name)));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> Error {
        Error::InvalidTable {
            table: self.name.clone(),
            reason,
        }
    }
}

/// One column of a live table, as reported by the database driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveColumn {
    /// Column name.
    pub column_name: String,
    /// Driver-reported host type name; mapped before comparison.
    pub data_type: String,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub is_key: bool,
}

impl LiveColumn {
    /// Creates a live column row.
    #[must_use]
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>, is_key: bool) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            is_key,
        }
    }
}
