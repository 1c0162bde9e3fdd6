//! CREATE / DROP / existence-probe statements.

use tracing::debug;

use crate::dialect::{string_literal, Dialect};
use crate::error::{Error, Result};
use crate::schema::Table;

/// Generates `CREATE TABLE` for a declared table.
///
/// One `<name> <type>` line per element, then the `PRIMARY KEY` clause
/// over all key elements in declaration order, then the dialect's table
/// options.
///
/// # Errors
///
/// Returns [`Error::InvalidTable`] for malformed tables and
/// [`Error::NoPrimaryKey`] when no element is a key.
pub fn create_table_query(table: &Table, dialect: &Dialect) -> Result<String> {
    table.validate()?;
    if !table.has_key() {
        return Err(Error::NoPrimaryKey {
            table: table.name.clone(),
        });
    }

    let mut sql = format!("CREATE TABLE {}\n(\n", table.name);
    for element in &table.element_list {
        sql.push_str(&format!("\t{} {},\n", element.name, element.data_type));
    }
    let keys: Vec<&str> = table.keys().map(|e| e.name.as_str()).collect();
    sql.push_str(&format!("\tPRIMARY KEY ({})\n)", keys.join(", ")));

    if !dialect.table_options.is_empty() {
        sql.push('\n');
        sql.push_str(&dialect.table_options);
    }

    debug!(table = %table.name, %sql, "generated CREATE TABLE");
    Ok(sql)
}

/// Generates `DROP TABLE <name>`.
#[must_use]
pub fn drop_table_query(name: &str) -> String {
    format!("DROP TABLE {name}")
}

/// Generates a `count(*)` probe against the dialect's catalog that
/// returns 1 when `name` exists in schema `database`.
#[must_use]
pub fn check_table_exist_query(database: &str, name: &str, dialect: &Dialect) -> String {
    format!(
        "SELECT count(*) FROM {} WHERE table_schema = {} AND table_name = {}",
        dialect.catalog_table,
        string_literal(database),
        string_literal(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Element;

    fn page() -> Table {
        Table::new("Page")
            .element(Element::key("id", "int"))
            .element(Element::new("name", "text"))
    }

    #[test]
    fn create_table_layout() {
        let sql = create_table_query(&page(), &Dialect::mysql()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE Page\n(\n\tid int,\n\tname text,\n\tPRIMARY KEY (id)\n)\n\
             ENGINE=InnoDB CHARACTER SET utf8 COLLATE utf8_general_ci"
        );
    }

    #[test]
    fn composite_key_joined_in_declaration_order() {
        let table = Table::new("Link")
            .element(Element::key("source", "int"))
            .element(Element::new("anchor", "text"))
            .element(Element::key("target", "int"));
        let sql = create_table_query(&table, &Dialect::mysql()).unwrap();
        assert!(sql.contains("PRIMARY KEY (source, target)"));
    }

    #[test]
    fn empty_table_options_are_omitted() {
        let dialect = Dialect {
            table_options: String::new(),
            ..Dialect::mysql()
        };
        let sql = create_table_query(&page(), &dialect).unwrap();
        assert!(sql.ends_with("PRIMARY KEY (id)\n)"));
    }

    #[test]
    fn create_without_key_is_rejected() {
        let table = Table::new("Log").element(Element::new("line", "text"));
        let err = create_table_query(&table, &Dialect::mysql()).unwrap_err();
        assert_eq!(
            err,
            Error::NoPrimaryKey {
                table: "Log".into()
            }
        );
    }

    #[test]
    fn create_with_duplicate_columns_is_rejected() {
        let table = page().element(Element::new("name", "text"));
        let err = create_table_query(&table, &Dialect::mysql()).unwrap_err();
        assert!(matches!(err, Error::InvalidTable { .. }));
    }

    #[test]
    fn drop_table() {
        assert_eq!(drop_table_query("Page"), "DROP TABLE Page");
    }

    #[test]
    fn existence_probe_is_scoped_by_schema_and_name() {
        let sql = check_table_exist_query("crawler", "Page", &Dialect::mysql());
        assert_eq!(
            sql,
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_schema = 'crawler' AND table_name = 'Page'"
        );
    }

    #[test]
    fn existence_probe_escapes_literals() {
        let sql = check_table_exist_query("it's", "Page", &Dialect::mysql());
        assert!(sql.contains("table_schema = 'it''s'"));
    }
}
