//! Statement generation for each CLI command.

use anyhow::Context;
use recordsql_core::{
    create_table_query, exists_query, insert_query, sync_with, update_query, Dialect, SyncPlan,
    Table,
};
use tracing::{debug, info};

use crate::input::LiveSnapshot;

/// CREATE TABLE for every table.
pub fn create(tables: &[Table], dialect: &Dialect) -> anyhow::Result<Vec<String>> {
    tables
        .iter()
        .map(|table| {
            create_table_query(table, dialect)
                .with_context(|| format!("cannot create table {}", table.name))
        })
        .collect()
}

/// CREATE or ALTER statements bringing the live schema in line.
///
/// Every table is planned before anything is returned, so a conflict in
/// any table yields no statements at all.
pub fn sync(
    tables: &[Table],
    live: &LiveSnapshot,
    dialect: &Dialect,
) -> anyhow::Result<Vec<String>> {
    let mut statements = Vec::new();
    for table in tables {
        let plan = sync_with(live, table, dialect)
            .with_context(|| format!("cannot sync table {}", table.name))?;
        match plan {
            SyncPlan::Create(sql) | SyncPlan::Alter(sql) => statements.push(sql),
            SyncPlan::UpToDate => info!(table = %table.name, "up to date"),
        }
    }
    Ok(statements)
}

/// Existence, insert and update statements for every table, skipping the
/// ones a degenerate table cannot support.
pub fn dml(tables: &[Table], dialect: &Dialect) -> anyhow::Result<Vec<String>> {
    let mut statements = Vec::new();
    for table in tables {
        table
            .validate()
            .with_context(|| format!("cannot generate statements for table {}", table.name))?;
        for (kind, sql) in [
            ("exists", exists_query(table, dialect)),
            ("insert", insert_query(table, dialect)),
            ("update", update_query(table, dialect)),
        ] {
            if sql.is_empty() {
                debug!(table = %table.name, kind, "statement skipped");
            } else {
                statements.push(sql);
            }
        }
    }
    Ok(statements)
}
