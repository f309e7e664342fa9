//! Runs SELECT queries against plain CSV files.
//!
//! The dialect is deliberately tiny: `SELECT ... FROM ... [WHERE ...]`, with
//! flat `AND`/`OR` filters and a `COUNT` aggregate. No joins, no grouping, no
//! parentheses. What you get in exchange is a query engine small enough to
//! read in one sitting.
//!
//! Fair warning: `AND` and `OR` are applied strictly left to right, without
//! the precedence real SQL gives them. See the README before relying on
//! mixed combinators.

pub mod context;
mod engine;
mod error;

/// Tables and where they come from.
pub mod data {
    pub use crate::engine::source::{
        normalize_column, ColumnNotFoundError, CsvTableSource, Row, Table, TableNotFoundError,
        TableSource,
    };
}

pub use engine::{
    execute, parse, render_result, run_query, Aggregate, Comparison, Condition, ConditionEntry,
    LogicalOp, ParsedQuery, QueryResult, SelectList, TableName,
};
pub use error::Error;
