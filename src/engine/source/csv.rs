//! CSV-backed tables.

use crate::engine::source::{normalize_column, Row, Table, TableNotFoundError, TableSource};
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::fs::File;
use std::path::PathBuf;

/// Resolves table references to `.csv` files inside one directory.
///
/// A reference matches either as-is or with `.csv` appended; the first
/// existing candidate wins.
pub struct CsvTableSource {
    base_dir: PathBuf,
}

impl CsvTableSource {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        CsvTableSource {
            base_dir: base_dir.into(),
        }
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        let mut candidates = vec![self.base_dir.join(name)];
        if !name.to_lowercase().ends_with(".csv") {
            candidates.push(self.base_dir.join(format!("{name}.csv")));
        }

        candidates
            .into_iter()
            .find(|candidate| candidate.is_file())
    }
}

impl TableSource for CsvTableSource {
    fn resolve(&self, name: &str) -> Result<Table, crate::Error> {
        let path = self
            .locate(name)
            .ok_or_else(|| TableNotFoundError(name.to_string()))?;
        debug!("reading table '{}' from {}", name, path.display());

        // Trim::All takes care of the whitespace in both headers and cells,
        // flexible() lets short records through; we pad those below.
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(File::open(path)?);

        let columns: Vec<String> = reader.headers()?.iter().map(normalize_column).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;

            let mut row = Row::new();
            for (index, column) in columns.iter().enumerate() {
                let value = record.get(index).unwrap_or("").to_string();
                row.insert(column.clone(), value);
            }
            rows.push(row);
        }

        Ok(Table { columns, rows })
    }
}
