//! Runs a parsed query against a resolved table.
//!
//! Filtering always happens first; what happens next depends on the select
//! list: pass the rows through (`*`), count them (`COUNT(...)`), or project
//! the requested columns.

use crate::engine::evaluate::evaluate;
use crate::engine::source::{normalize_column, ColumnNotFoundError, Row, Table, TableSource};
use crate::engine::syntax::{ParsedQuery, SelectList};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

pub fn execute<S: TableSource>(
    query: &ParsedQuery,
    source: &S,
) -> Result<QueryResult, crate::Error> {
    debug!("executing: {}", query.input.trim());

    let Table { columns, rows } = source.resolve(query.table.as_str())?;
    debug!("table '{}' loaded, {} rows", query.table, rows.len());

    let mut filtered = Vec::with_capacity(rows.len());
    for row in rows {
        if evaluate(&row, query.conditions.as_deref())? {
            filtered.push(row);
        }
    }
    debug!("{} rows left after filtering", filtered.len());

    match &query.select {
        SelectList::Star => Ok(QueryResult::Rows {
            columns,
            rows: filtered,
        }),
        SelectList::Columns(entries) if entries.iter().any(|entry| is_count_call(entry)) => {
            Ok(QueryResult::Aggregates(aggregate(entries, &filtered)))
        }
        SelectList::Columns(entries) => project(entries, &filtered),
    }
}

/// What a query evaluates to: rows with an ordered output schema, or one
/// count per `COUNT(...)` expression.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Rows {
        columns: Vec<String>,
        rows: Vec<Row>,
    },
    Aggregates(Vec<Aggregate>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub expression: String,
    pub count: usize,
}

fn is_count_call(entry: &str) -> bool {
    count_argument(entry).is_some()
}

/// The text between the parens of a `COUNT(...)` entry, or None for plain
/// columns. A missing closing paren takes everything to the end of the
/// entry.
fn count_argument(entry: &str) -> Option<&str> {
    static COUNT_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^count\(([^)]*)").unwrap());

    COUNT_CALL.captures(entry).map(|captures| {
        captures
            .get(1)
            .expect("the regex always has its one capture group")
            .as_str()
    })
}

/// One aggregate per COUNT entry, in select-list order.
///
/// Plain columns mixed into an aggregate select list are dropped without an
/// error; see the README for why this stays that way. Counting a named
/// column only counts rows where its trimmed value is non-empty, and a
/// column the table doesn't have simply counts zero.
fn aggregate(entries: &[String], rows: &[Row]) -> Vec<Aggregate> {
    let mut aggregates = Vec::new();

    for entry in entries {
        let Some(argument) = count_argument(entry) else {
            continue;
        };
        let argument = argument.trim();

        let aggregate = if argument == "*" {
            Aggregate {
                expression: "COUNT(*)".to_string(),
                count: rows.len(),
            }
        } else {
            let column = normalize_column(argument);
            let count = rows
                .iter()
                .filter(|row| {
                    row.get(&column)
                        .map_or(false, |value| !value.trim().is_empty())
                })
                .count();

            Aggregate {
                expression: format!("COUNT({argument})"),
                count,
            }
        };

        aggregates.push(aggregate);
    }

    aggregates
}

/// Builds output rows holding only the requested columns.
///
/// The output keeps the requested spelling as the key while the lookup goes
/// through the normalized name. The unknown-column check runs per row, so
/// an empty filtered set never reaches it.
fn project(entries: &[String], rows: &[Row]) -> Result<QueryResult, crate::Error> {
    let mut projected = Vec::with_capacity(rows.len());

    for row in rows {
        let mut out = Row::new();
        for requested in entries {
            let value = row
                .get(&normalize_column(requested))
                .ok_or_else(|| ColumnNotFoundError(requested.clone()))?;
            out.insert(requested.clone(), value.clone());
        }
        projected.push(out);
    }

    Ok(QueryResult::Rows {
        columns: entries.to_vec(),
        rows: projected,
    })
}
