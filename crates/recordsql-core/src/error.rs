//! Error types for schema generation and reconciliation.

/// Errors raised while generating or reconciling table schemas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A declared column exists live with a different database type.
    #[error(
        "Element [{table}:{column}] type [{declared}] and database element type [{live}] do not match"
    )]
    TypeMismatch {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Declared database type.
        declared: String,
        /// Live database type, after mapping.
        live: String,
    },

    /// A declared column exists live with a different key flag.
    #[error(
        "Element [{table}:{column}] key setting does not match (declared key: {declared}, database key: {live})"
    )]
    KeyMismatch {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Declared key flag.
        declared: bool,
        /// Live key flag.
        live: bool,
    },

    /// A declared key column is absent from the live table.
    ///
    /// Key columns are never added automatically; they have to be added
    /// to the live table by hand.
    #[error(
        "Key column [{table}:{column}] is missing from the database; key changes must be applied manually"
    )]
    KeyColumnMissing {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// CREATE TABLE was requested for a table without any key element.
    #[error("Table [{table}] declares no key element; refusing to emit an empty PRIMARY KEY")]
    NoPrimaryKey {
        /// Table name.
        table: String,
    },

    /// The table descriptor itself is malformed.
    #[error("Table [{table}] is invalid: {reason}")]
    InvalidTable {
        /// Table name.
        table: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl Error {
    /// Returns `true` when declared and live schema disagree.
    ///
    /// Statements generated alongside such an error must not be executed.
    #[must_use]
    pub const fn is_schema_conflict(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::KeyMismatch { .. } | Self::KeyColumnMissing { .. }
        )
    }

    /// Returns the name of the table the error refers to.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::TypeMismatch { table, .. }
            | Self::KeyMismatch { table, .. }
            | Self::KeyColumnMissing { table, .. }
            | Self::NoPrimaryKey { table }
            | Self::InvalidTable { table, .. } => table,
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_message_names_everything() {
        let err = Error::TypeMismatch {
            table: "Page".into(),
            column: "id".into(),
            declared: "int".into(),
            live: "bigint".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Page:id"));
        assert!(msg.contains("[int]"));
        assert!(msg.contains("[bigint]"));
        assert!(err.is_schema_conflict());
    }

    #[test]
    fn key_mismatch_formats_both_flags() {
        let err = Error::KeyMismatch {
            table: "Page".into(),
            column: "url".into(),
            declared: true,
            live: false,
        };
        let msg = err.to_string();
        assert!(msg.contains("declared key: true"));
        assert!(msg.contains("database key: false"));
        assert!(err.is_schema_conflict());
    }

    #[test]
    fn generation_errors_are_not_conflicts() {
        let err = Error::NoPrimaryKey {
            table: "Log".into(),
        };
        assert!(!err.is_schema_conflict());
        assert_eq!(err.table(), "Log");
    }
}
