//! SQL dialect configuration.
//!
//! The generators only differ between databases in a few fragments: the
//! options trailing `CREATE TABLE`, the catalog table used for existence
//! probes, and the parameter placeholder prefix. Those live here so the
//! generators and the differ stay dialect-agnostic.

use serde::{Deserialize, Serialize};

const MYSQL_TABLE_OPTIONS: &str = "ENGINE=InnoDB CHARACTER SET utf8 COLLATE utf8_general_ci";
const MYSQL_CATALOG_TABLE: &str = "information_schema.tables";
const MYSQL_PARAMETER_PREFIX: &str = "@";

/// Dialect-specific SQL fragments.
///
/// Deserializing a partial value fills the missing fields from
/// [`Dialect::mysql`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Appended on its own line after `CREATE TABLE (...)`. Empty for none.
    pub table_options: String,
    /// Metadata catalog queried by table existence probes.
    pub catalog_table: String,
    /// Prefix of named parameter placeholders.
    pub parameter_prefix: String,
}

impl Dialect {
    /// The MySQL dialect.
    #[must_use]
    pub fn mysql() -> Self {
        Self {
            table_options: MYSQL_TABLE_OPTIONS.to_string(),
            catalog_table: MYSQL_CATALOG_TABLE.to_string(),
            parameter_prefix: MYSQL_PARAMETER_PREFIX.to_string(),
        }
    }

    /// Renders the placeholder bound to `column`.
    #[must_use]
    pub fn placeholder(&self, column: &str) -> String {
        format!("{}{column}", self.parameter_prefix)
    }

    /// Renders `column=<placeholder>`.
    #[must_use]
    pub fn assignment(&self, column: &str) -> String {
        format!("{column}={}", self.placeholder(column))
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::mysql()
    }
}

/// Quotes `value` as a single-quoted SQL string literal.
///
/// Backslashes are doubled as well as quotes, since MySQL treats `\` as an
/// escape character inside literals by default.
#[must_use]
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}
