//! The engine itself: parse a query, run it over a table, render the result.
//!
//! The modules line up with the processing pipeline:
//!
//! ```text
//!     "SELECT name FROM people WHERE age > 30"
//!        |                                          syntax
//!        v
//!     ParsedQuery { select, table, conditions }
//!        |                                          execution (+ source, evaluate)
//!        v
//!     QueryResult::Rows { columns, rows }
//!        |                                          rendering
//!        v
//!     "name\n----\nBob \n"
//! ```

mod evaluate;
mod execution;
mod rendering;
pub mod source;
mod syntax;

#[cfg(test)]
mod tests;

pub use execution::{execute, Aggregate, QueryResult};
pub use rendering::render_result;
pub use syntax::{
    parse, Condition, ConditionEntry, ParsedQuery, SelectList, SyntaxError, TableName,
};

use crate::engine::source::TableSource;

/// One-stop shop: parse the input and execute it against the given source.
pub fn run_query<S: TableSource>(input: &str, source: &S) -> Result<QueryResult, crate::Error> {
    let query = syntax::parse(input)?;

    execution::execute(&query, source)
}

/// The six comparison operators the WHERE clause understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LesserThan,
    LesserOrEqual,
}

/// How two neighbouring conditions combine. Applied in textual order, there
/// is no precedence between And and Or.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}
