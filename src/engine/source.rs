//! Tables, rows, and the trait that produces them.
//!
//! The engine never reads files itself; it asks a [`TableSource`] to turn a
//! table reference into a [`Table`]. The one real implementation reads CSV
//! files (see [`csv`]), tests plug in their own.

use std::collections::HashMap;
use thiserror::Error;

mod csv;

pub use self::csv::CsvTableSource;

/// One record, keyed by normalized column name. Values are trimmed text;
/// nothing numeric is ever stored back here.
pub type Row = HashMap<String, String>;

/// Rows plus the column schema in source order. Every row has exactly the
/// schema's columns as keys; missing source cells are empty strings.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Resolves a table reference to its data, fresh on every call.
pub trait TableSource {
    fn resolve(&self, name: &str) -> Result<Table, crate::Error>;
}

/// The normalization every column lookup goes through: trim, then
/// lower-case.
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Error)]
#[error("no table found for '{0}'")]
pub struct TableNotFoundError(pub String);

#[derive(Debug, Error)]
#[error("column '{0}' not found")]
pub struct ColumnNotFoundError(pub String);
