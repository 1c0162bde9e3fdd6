//! Schema, live catalog and dialect files.
//!
//! Declared schema files are JSON arrays of type definitions. Live schema
//! files map table names to their ordered live columns, as a catalog dump
//! would report them. Dialect files hold a (possibly partial) dialect.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};

use recordsql_core::{extract_schema, Dialect, Introspect, LiveColumn, Table, TypeDefinition};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Errors that can occur while loading input files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads type definitions and extracts the tables among them.
///
/// Types without the table marker are skipped.
pub fn load_tables(path: &Path) -> Result<Vec<Table>, LoadError> {
    let definitions: Vec<TypeDefinition> = read_json(path)?;
    let tables: Vec<Table> = definitions
        .iter()
        .filter_map(|def| {
            let table = extract_schema(def);
            if table.is_none() {
                info!(type_name = %def.name, "not a table, skipping");
            }
            table
        })
        .collect();
    debug!(
        path = %path.display(),
        definitions = definitions.len(),
        tables = tables.len(),
        "loaded schema file"
    );
    Ok(tables)
}

/// Loads a dialect file, or returns the MySQL dialect when none is given.
pub fn load_dialect(path: Option<&Path>) -> Result<Dialect, LoadError> {
    match path {
        Some(path) => read_json(path),
        None => Ok(Dialect::mysql()),
    }
}

/// Live schema read from a catalog dump.
#[derive(Debug, Clone, Default)]
pub struct LiveSnapshot {
    tables: BTreeMap<String, Vec<LiveColumn>>,
}

impl LiveSnapshot {
    /// Loads a live schema file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let tables: BTreeMap<String, Vec<LiveColumn>> = read_json(path)?;
        debug!(path = %path.display(), tables = tables.len(), "loaded live schema");
        Ok(Self { tables })
    }
}

impl Introspect for LiveSnapshot {
    type Error = Infallible;

    fn live_columns(&self, table: &str) -> Result<Option<Vec<LiveColumn>>, Infallible> {
        Ok(self.tables.get(table).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_tables_and_skips_plain_types() {
        let file = file_with(
            r#"[
                {"name": "Page", "table": true, "fields": [
                    {"name": "id", "type_name": "Int32", "key": true},
                    {"name": "url", "type_name": "String"}
                ]},
                {"name": "Settings", "fields": [{"name": "depth", "type_name": "Int32"}]}
            ]"#,
        );
        let tables = load_tables(file.path()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "Page");
        assert_eq!(tables[0].element_list[1].data_type, "text");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_tables(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = file_with("{not json");
        let err = load_tables(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn partial_dialect_file_keeps_mysql_defaults() {
        let file = file_with(r#"{"parameter_prefix": ":"}"#);
        let dialect = load_dialect(Some(file.path())).unwrap();
        assert_eq!(dialect.parameter_prefix, ":");
        assert_eq!(dialect.catalog_table, "information_schema.tables");
        assert_eq!(load_dialect(None).unwrap(), Dialect::mysql());
    }

    #[test]
    fn live_snapshot_reports_known_tables_only() {
        let file = file_with(
            r#"{"Page": [{"column_name": "id", "data_type": "Int32", "is_key": true}]}"#,
        );
        let snapshot = LiveSnapshot::load(file.path()).unwrap();
        let Ok(Some(columns)) = snapshot.live_columns("Page") else {
            panic!("expected Page columns");
        };
        assert_eq!(columns, vec![LiveColumn::new("id", "Int32", true)]);
        assert!(matches!(snapshot.live_columns("Link"), Ok(None)));
    }
}
