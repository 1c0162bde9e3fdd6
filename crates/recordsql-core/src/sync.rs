//! Create-or-alter planning for one declared table.

use tracing::{debug, info};

use crate::ddl::create_table_query;
use crate::dialect::Dialect;
use crate::diff::reconcile;
use crate::error::Error;
use crate::introspect::Introspect;
use crate::schema::{LiveColumn, Table};

/// What to execute to bring a live table in line with its declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    /// The table does not exist; run this `CREATE TABLE`.
    Create(String),
    /// The table exists but lacks columns; run this `ALTER TABLE`.
    Alter(String),
    /// Nothing to do.
    UpToDate,
}

impl SyncPlan {
    /// Returns the statement to execute, if any.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Create(sql) | Self::Alter(sql) => Some(sql),
            Self::UpToDate => None,
        }
    }
}

/// Errors from [`sync_with`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError<E: std::error::Error + 'static> {
    /// The live schema could not be read.
    #[error("failed to introspect table: {0}")]
    Introspect(#[source] E),

    /// Declared and live schema are incompatible, or the table cannot be
    /// created.
    #[error(transparent)]
    Schema(#[from] Error),
}

/// Plans the statement for `declared` given its live columns, where `None`
/// means the table does not exist yet.
///
/// # Errors
///
/// Propagates [`create_table_query`] errors for new tables and
/// [`reconcile`] conflicts for existing ones.
pub fn plan_sync(
    declared: &Table,
    live: Option<&[LiveColumn]>,
    dialect: &Dialect,
) -> crate::Result<SyncPlan> {
    let plan = match live {
        None => SyncPlan::Create(create_table_query(declared, dialect)?),
        Some(columns) => {
            let sql = reconcile(declared, columns)?;
            if sql.is_empty() {
                SyncPlan::UpToDate
            } else {
                SyncPlan::Alter(sql)
            }
        }
    };
    match &plan {
        SyncPlan::Create(_) => info!(table = %declared.name, "table missing, will create"),
        SyncPlan::Alter(_) => info!(table = %declared.name, "table missing columns, will alter"),
        SyncPlan::UpToDate => debug!(table = %declared.name, "table up to date"),
    }
    Ok(plan)
}

/// Reads the live schema of `declared` from `source` and plans its sync.
///
/// # Errors
///
/// Returns [`SyncError::Introspect`] when `source` fails and
/// [`SyncError::Schema`] for anything [`plan_sync`] rejects.
pub fn sync_with<I: Introspect>(
    source: &I,
    declared: &Table,
    dialect: &Dialect,
) -> Result<SyncPlan, SyncError<I::Error>> {
    let live = source
        .live_columns(&declared.name)
        .map_err(SyncError::Introspect)?;
    Ok(plan_sync(declared, live.as_deref(), dialect)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::schema::Element;

    #[derive(Debug, thiserror::Error)]
    #[error("catalog unavailable")]
    struct Unavailable;

    struct Catalog(HashMap<String, Vec<LiveColumn>>);

    impl Introspect for Catalog {
        type Error = Unavailable;

        fn live_columns(&self, table: &str) -> Result<Option<Vec<LiveColumn>>, Unavailable> {
            Ok(self.0.get(table).cloned())
        }
    }

    struct Offline;

    impl Introspect for Offline {
        type Error = Unavailable;

        fn live_columns(&self, _table: &str) -> Result<Option<Vec<LiveColumn>>, Unavailable> {
            Err(Unavailable)
        }
    }

    fn page() -> Table {
        Table::new("Page")
            .element(Element::key("id", "int"))
            .element(Element::new("url", "text"))
    }

    #[test]
    fn absent_table_is_created() {
        let plan = plan_sync(&page(), None, &Dialect::mysql()).unwrap();
        assert!(matches!(plan, SyncPlan::Create(ref sql) if sql.starts_with("CREATE TABLE Page")));
    }

    #[test]
    fn existing_table_is_altered() {
        let live = [LiveColumn::new("id", "Int32", true)];
        let plan = plan_sync(&page(), Some(&live), &Dialect::mysql()).unwrap();
        assert_eq!(
            plan,
            SyncPlan::Alter("ALTER TABLE Page\n\tADD COLUMN url text AFTER id".into())
        );
    }

    #[test]
    fn matching_table_is_up_to_date() {
        let live = [
            LiveColumn::new("id", "Int32", true),
            LiveColumn::new("url", "String", false),
        ];
        let plan = plan_sync(&page(), Some(&live), &Dialect::mysql()).unwrap();
        assert_eq!(plan, SyncPlan::UpToDate);
        assert!(plan.sql().is_none());
    }

    #[test]
    fn sync_with_reads_the_catalog() {
        let catalog = Catalog(HashMap::from([(
            "Page".to_string(),
            vec![LiveColumn::new("id", "Int32", true)],
        )]));
        let plan = sync_with(&catalog, &page(), &Dialect::mysql()).unwrap();
        assert!(matches!(plan, SyncPlan::Alter(_)));

        let empty = Catalog(HashMap::new());
        let plan = sync_with(&empty, &page(), &Dialect::mysql()).unwrap();
        assert!(matches!(plan, SyncPlan::Create(_)));
    }

    #[test]
    fn sync_with_surfaces_both_error_kinds() {
        let err = sync_with(&Offline, &page(), &Dialect::mysql()).unwrap_err();
        assert!(matches!(err, SyncError::Introspect(Unavailable)));

        let catalog = Catalog(HashMap::from([(
            "Page".to_string(),
            vec![LiveColumn::new("id", "Int64", true)],
        )]));
        let err = sync_with(&catalog, &page(), &Dialect::mysql()).unwrap_err();
        assert!(matches!(err, SyncError::Schema(ref e) if e.is_schema_conflict()));
    }
}
