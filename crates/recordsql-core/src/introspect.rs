//! Live schema introspection trait.
//!
//! Drivers and front ends implement [`Introspect`] to report the live
//! columns of a table. The core only defines the trait so it stays
//! driver-agnostic and never queries the database itself.

use crate::schema::LiveColumn;

/// Reads the live schema of one table.
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error + 'static;

    /// Returns the live columns of `table` in their live order, or `None`
    /// when the table does not exist.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the catalog cannot be read.
    fn live_columns(&self, table: &str) -> Result<Option<Vec<LiveColumn>>, Self::Error>;
}
