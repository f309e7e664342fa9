//! Decides, for one row at a time, whether the WHERE clause accepts it.
//!
//! Cell values are stored as text and only interpreted as numbers at the
//! moment two of them are compared. [`coerce`] is the whole typing story:
//! it either reads a number out of the text or it doesn't, and the
//! comparison picks numeric or string semantics based on what *both* sides
//! turned into.

use crate::engine::source::{normalize_column, ColumnNotFoundError, Row};
use crate::engine::syntax::{Condition, ConditionEntry};
use crate::engine::{Comparison, LogicalOp};
use crate::error::InternalError;
use std::cmp::Ordering;

/// Runs the condition list against one row.
///
/// An absent or empty list accepts everything. The fold is strictly left to
/// right: `a OR b AND c` means `(a OR b) AND c`, not what SQL would make of
/// it.
pub(super) fn evaluate(
    row: &Row,
    conditions: Option<&[ConditionEntry]>,
) -> Result<bool, crate::Error> {
    let Some(entries) = conditions else {
        return Ok(true);
    };
    if entries.is_empty() {
        return Ok(true);
    }

    let mut result: Option<bool> = None;
    // The most recently seen combinator. Deliberately not cleared after
    // use; a later condition reuses it until the next AND/OR shows up.
    let mut pending: Option<LogicalOp> = None;

    for entry in entries {
        match entry {
            ConditionEntry::Combinator(combinator) => pending = Some(*combinator),
            ConditionEntry::Condition(condition) => {
                let accepted = check(row, condition)?;

                result = Some(match (result, pending) {
                    (None, _) => accepted,
                    (Some(running), Some(LogicalOp::And)) => running && accepted,
                    (Some(running), Some(LogicalOp::Or)) => running || accepted,
                    (Some(_), None) => {
                        return Err(InternalError(
                            "two conditions with no combinator between them".to_string(),
                        )
                        .into())
                    }
                });
            }
        }
    }

    Ok(result.unwrap_or(false))
}

fn check(row: &Row, condition: &Condition) -> Result<bool, crate::Error> {
    let value = row
        .get(&normalize_column(&condition.column))
        .ok_or_else(|| ColumnNotFoundError(condition.column.clone()))?;

    Ok(compare(value, condition.comparison, &condition.literal))
}

/// Compares two raw cell/literal texts under one operator.
///
/// Numeric semantics apply only when both sides coerce to numbers; in every
/// other case both sides are compared as trimmed, case-folded strings.
fn compare(left: &str, comparison: Comparison, right: &str) -> bool {
    let ordering = match (coerce(left), coerce(right)) {
        (Coerced::Number(left), Coerced::Number(right)) => left.total_cmp(&right),
        (Coerced::Text(left), Coerced::Text(right)) => left.cmp(&right),
        (Coerced::Number(_), Coerced::Text(text)) => fold(left).cmp(&text),
        (Coerced::Text(text), Coerced::Number(_)) => text.cmp(&fold(right)),
    };

    comparison.accepts(ordering)
}

/// What a cell's text turned out to hold.
#[derive(Debug, Clone, PartialEq)]
enum Coerced {
    Number(f64),
    Text(String),
}

/// Best-effort numeric reading of a text value.
///
/// A value with a literal `.` in it may be a float, anything else may be an
/// integer; scientific notation without a dot, `inf` and friends stay text
/// on purpose. Failing both, the value is a trimmed, case-folded string.
fn coerce(raw: &str) -> Coerced {
    let trimmed = raw.trim();

    if trimmed.contains('.') {
        if let Ok(number) = trimmed.parse::<f64>() {
            return Coerced::Number(number);
        }
    } else if let Ok(number) = trimmed.parse::<i64>() {
        return Coerced::Number(number as f64);
    }

    Coerced::Text(fold(raw))
}

fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Comparison {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Equals => ordering == Ordering::Equal,
            Comparison::NotEquals => ordering != Ordering::Equal,
            Comparison::GreaterThan => ordering == Ordering::Greater,
            Comparison::GreaterOrEqual => ordering != Ordering::Less,
            Comparison::LesserThan => ordering == Ordering::Less,
            Comparison::LesserOrEqual => ordering != Ordering::Greater,
        }
    }
}
