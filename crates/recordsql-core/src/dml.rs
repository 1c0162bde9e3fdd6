//! Parameterized row statements.
//!
//! Every placeholder is named after its column (`@url` binds the `url`
//! column), so the execution layer must supply one value per column name.
//! Key elements form the identity predicate.
//!
//! Tables without the columns a statement needs yield an empty string,
//! meaning "nothing can be executed" rather than malformed SQL.

use tracing::{debug, warn};

use crate::dialect::Dialect;
use crate::schema::{Element, Table};

fn key_predicate(table: &Table, dialect: &Dialect) -> String {
    assignments(table.keys(), dialect).join(" AND ")
}

fn assignments<'a>(elements: impl Iterator<Item = &'a Element>, dialect: &Dialect) -> Vec<String> {
    elements.map(|e| dialect.assignment(&e.name)).collect()
}

/// Generates a `SELECT COUNT(*)` probe for the row identified by the
/// table's key elements.
///
/// Returns an empty string when the table has no key element.
#[must_use]
pub fn exists_query(table: &Table, dialect: &Dialect) -> String {
    if !table.has_key() {
        warn!(table = %table.name, "no key element, cannot check row existence");
        return String::new();
    }
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {}",
        table.name,
        key_predicate(table, dialect)
    );
    debug!(%sql, "generated existence query");
    sql
}

/// Generates an `INSERT` binding every column, in declaration order.
///
/// Returns an empty string when the table has no elements.
#[must_use]
pub fn insert_query(table: &Table, dialect: &Dialect) -> String {
    if table.element_list.is_empty() {
        warn!(table = %table.name, "no elements, cannot insert");
        return String::new();
    }
    let columns: Vec<&str> = table.element_list.iter().map(|e| e.name.as_str()).collect();
    let values: Vec<String> = table
        .element_list
        .iter()
        .map(|e| dialect.placeholder(&e.name))
        .collect();
    let sql = format!(
        "INSERT INTO {}\n({})\nVALUES\n({})",
        table.name,
        columns.join(","),
        values.join(",")
    );
    debug!(%sql, "generated insert query");
    sql
}

/// Generates an `UPDATE` that sets every non-key column of the row
/// identified by the key columns.
///
/// Returns an empty string when the table has no key element or no
/// non-key element.
#[must_use]
pub fn update_query(table: &Table, dialect: &Dialect) -> String {
    let sets = assignments(table.non_keys(), dialect);
    if sets.is_empty() || !table.has_key() {
        warn!(
            table = %table.name,
            "update needs at least one key and one non-key element"
        );
        return String::new();
    }
    let sql = format!(
        "UPDATE {} SET\n{}\nWHERE\n{}",
        table.name,
        sets.join(","),
        key_predicate(table, dialect)
    );
    debug!(%sql, "generated update query");
    sql
}

/// Lists the parameter names a statement over `table` binds, in
/// declaration order.
#[must_use]
pub fn parameter_names(table: &Table) -> Vec<&str> {
    table.element_list.iter().map(|e| e.name.as_str()).collect()
}
