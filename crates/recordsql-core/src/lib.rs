//! # recordsql-core
//!
//! Maps record type definitions to relational table schemas and generates
//! the SQL needed to create, evolve and fill those tables.
//!
//! This crate provides:
//! - A type mapper from host type names to database column types
//! - Schema extraction from marker-annotated record definitions
//! - `CREATE` / `DROP` / existence-probe generation
//! - An additive, order-preserving differ between declared and live schema
//! - Parameterized `SELECT COUNT` / `INSERT` / `UPDATE` generation
//!
//! It never talks to a database: live schema comes in as [`LiveColumn`]
//! rows and SQL goes out as text.
//!
//! ## Declaring a table
//!
//! ```rust
//! use recordsql_core::record::{FieldDefinition, TypeDefinition, extract_schema};
//! use recordsql_core::{Dialect, LiveColumn, create_table_query, reconcile};
//!
//! let def = TypeDefinition::table("Page")
//!     .field(FieldDefinition::key("id", "Int32"))
//!     .field(FieldDefinition::new("url", "String"));
//! let table = extract_schema(&def).unwrap();
//!
//! let create = create_table_query(&table, &Dialect::mysql()).unwrap();
//! assert!(create.contains("PRIMARY KEY (id)"));
//!
//! // The live table only has `id`; `url` gets added after it.
//! let live = [LiveColumn::new("id", "Int32", true)];
//! let alter = reconcile(&table, &live).unwrap();
//! assert_eq!(alter, "ALTER TABLE Page\n\tADD COLUMN url text AFTER id");
//! ```
//!
//! With `recordsql-derive`, `#[derive(Record)]` builds the definition from
//! a struct carrying `#[table]` and `#[key]` markers.

pub mod ddl;
pub mod dialect;
pub mod diff;
pub mod dml;
pub mod error;
pub mod introspect;
pub mod record;
pub mod schema;
pub mod sync;
pub mod types;

pub use ddl::{check_table_exist_query, create_table_query, drop_table_query};
pub use dialect::Dialect;
pub use diff::{plan_alter, reconcile, AddColumn, SchemaDiff};
pub use dml::{exists_query, insert_query, parameter_names, update_query};
pub use error::{Error, Result};
pub use introspect::Introspect;
pub use record::{extract_schema, FieldDefinition, Record, TypeDefinition};
pub use schema::{Element, LiveColumn, Table};
pub use sync::{plan_sync, sync_with, SyncError, SyncPlan};
pub use types::{default_value, to_database_type};
