//! Turns query results into text.
//!
//! All the Display impls live here so the rest of the engine never worries
//! about presentation.

use crate::engine::execution::{Aggregate, QueryResult};
use crate::engine::source::Row;
use std::fmt::{Display, Formatter};

pub fn render_result(result: &QueryResult) -> String {
    format!("{result}")
}

impl Display for QueryResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryResult::Rows { rows, .. } if rows.is_empty() => writeln!(f, "(no rows)"),
            QueryResult::Rows { columns, rows } => write!(f, "{}", AlignedTable { columns, rows }),
            QueryResult::Aggregates(aggregates) => {
                for aggregate in aggregates {
                    writeln!(f, "{aggregate}")?;
                }

                Ok(())
            }
        }
    }
}

impl Display for Aggregate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.expression, self.count)
    }
}

/// Header, rule, then one line per row, every cell left-justified to the
/// widest value its column has seen (header included).
struct AlignedTable<'a> {
    columns: &'a [String],
    rows: &'a [Row],
}

impl Display for AlignedTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|column| {
                self.rows
                    .iter()
                    .map(|row| cell(row, column).chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{:<width$}", column, width = widths[index])?;
        }
        writeln!(f)?;

        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                write!(f, "-+-")?;
            }
            write!(f, "{}", "-".repeat(*width))?;
        }
        writeln!(f)?;

        for row in self.rows {
            for (index, column) in self.columns.iter().enumerate() {
                if index > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{:<width$}", cell(row, column), width = widths[index])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}
