//! Declared-versus-live schema reconciliation.
//!
//! Compares a declared [`Table`] with the live columns reported by the
//! database and produces the `ALTER TABLE` needed to converge. The diff is
//! additive only: columns are added, never dropped, retyped or re-keyed.
//! Each added column is placed `AFTER` its declared predecessor so live
//! column order follows declaration order.
//!
//! Reconciliation runs in two phases, after the declared table itself has
//! passed [`Table::validate`]:
//!
//! 1. Validate every declared element against the live columns. A type or
//!    key-flag mismatch, or a key column missing live, fails the whole
//!    call before any SQL is produced.
//! 2. Walk declared elements in order and emit `ADD COLUMN` for each one
//!    missing live.

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Element, LiveColumn, Table};
use crate::types::to_database_type;

/// A column to add to a live table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumn {
    /// Column name.
    pub name: String,
    /// Database type name.
    pub data_type: String,
    /// Existing or newly added column to place this one after; `None` for
    /// the first declared column.
    pub after: Option<String>,
}

impl AddColumn {
    /// Renders the `ADD COLUMN` clause.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match &self.after {
            Some(previous) => format!("ADD COLUMN {} {} AFTER {previous}", self.name, self.data_type),
            None => format!("ADD COLUMN {} {}", self.name, self.data_type),
        }
    }
}

/// Columns to add to one table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiff {
    /// Table name.
    pub table: String,
    /// Columns to add.
    pub additions: Vec<AddColumn>,
}

impl SchemaDiff {
    /// Returns `true` if the live table already matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    /// Renders a single `ALTER TABLE` statement, or an empty string when
    /// there is nothing to add.
    #[must_use]
    pub fn to_sql(&self) -> String {
        if self.additions.is_empty() {
            return String::new();
        }
        let clauses: Vec<String> = self
            .additions
            .iter()
            .map(|add| format!("\t{}", add.to_sql()))
            .collect();
        format!("ALTER TABLE {}\n{}", self.table, clauses.join(",\n"))
    }
}

fn find_live<'a>(live: &'a [LiveColumn], name: &str) -> Option<&'a LiveColumn> {
    live.iter().find(|c| c.column_name == name)
}

/// Checks one declared element against the live columns.
fn validate_element(table: &str, element: &Element, live: &[LiveColumn]) -> Result<()> {
    match find_live(live, &element.name) {
        Some(column) => {
            let live_type = to_database_type(&column.data_type);
            if live_type != element.data_type {
                return Err(Error::TypeMismatch {
                    table: table.to_string(),
                    column: element.name.clone(),
                    declared: element.data_type.clone(),
                    live: live_type,
                });
            }
            if column.is_key != element.is_key {
                return Err(Error::KeyMismatch {
                    table: table.to_string(),
                    column: element.name.clone(),
                    declared: element.is_key,
                    live: column.is_key,
                });
            }
            Ok(())
        }
        None if element.is_key => Err(Error::KeyColumnMissing {
            table: table.to_string(),
            column: element.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Validates `declared` against `live` and lists the columns to add.
///
/// Live columns absent from the declaration are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidTable`] if `declared` has empty or duplicate
/// element names. Otherwise returns the first schema conflict found, in
/// declaration order: [`Error::TypeMismatch`], [`Error::KeyMismatch`] or
/// [`Error::KeyColumnMissing`].
pub fn plan_alter(declared: &Table, live: &[LiveColumn]) -> Result<SchemaDiff> {
    declared.validate()?;
    for element in &declared.element_list {
        validate_element(&declared.name, element, live)?;
    }

    let mut additions = Vec::new();
    let mut previous: Option<&str> = None;
    for element in &declared.element_list {
        if find_live(live, &element.name).is_none() {
            debug!(
                table = %declared.name,
                column = %element.name,
                after = ?previous,
                "column missing from live table"
            );
            additions.push(AddColumn {
                name: element.name.clone(),
                data_type: element.data_type.clone(),
                after: previous.map(str::to_string),
            });
        }
        previous = Some(element.name.as_str());
    }

    Ok(SchemaDiff {
        table: declared.name.clone(),
        additions,
    })
}

/// Validates `declared` against `live` and renders the `ALTER TABLE`
/// statement that adds every missing column.
///
/// An empty string means nothing needs to be executed.
///
/// # Errors
///
/// Same as [`plan_alter`]; no statement is produced on error.
pub fn reconcile(declared: &Table, live: &[LiveColumn]) -> Result<String> {
    let sql = plan_alter(declared, live)?.to_sql();
    if !sql.is_empty() {
        debug!(table = %declared.name, %sql, "generated ALTER TABLE");
    }
    Ok(sql)
}
