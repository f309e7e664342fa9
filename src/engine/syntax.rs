//! Query text parsing.
//!
//! The dialect is keyword-anchored rather than grammar-driven: we look for
//! `SELECT`, ` FROM ` and ` WHERE ` (case-insensitively, the latter two with
//! spaces around them so we don't match inside identifiers) and everything
//! else falls out of the substrings between them. That keeps the parser
//! forgiving about what identifiers may look like, which is exactly the
//! contract this dialect promises.
//!
//! The WHERE clause gets real tokenization (see [`tokens`]) because quoted
//! literals may contain spaces and operator characters.

mod tokens;

use crate::engine::{Comparison, LogicalOp};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Turns query text into a [`ParsedQuery`].
///
/// Fails with a syntax error when the `SELECT` keyword or the ` FROM `
/// delimiter is missing, or when the WHERE clause is malformed.
pub fn parse(text: &str) -> Result<ParsedQuery, crate::Error> {
    let original = text.trim();
    let original = original.strip_suffix(';').unwrap_or(original).trim();
    let lower = original.to_ascii_lowercase();

    let (Some(select_at), Some(from_at)) = (lower.find("select"), lower.find(" from ")) else {
        return Err(SyntaxError::new("query must contain SELECT and FROM clauses").into());
    };

    // The keywords were located on the lower-cased copy, but since ASCII
    // lower-casing keeps byte offsets intact we can slice the original.
    let select_end = select_at + "select".len();
    let select_text = if from_at > select_end {
        &original[select_end..from_at]
    } else {
        ""
    };

    let remainder = original[from_at + " from ".len()..].trim();
    let remainder_lower = remainder.to_ascii_lowercase();

    let (table_text, condition_text) = match remainder_lower.find(" where ") {
        Some(where_at) => (
            remainder[..where_at].trim(),
            Some(remainder[where_at + " where ".len()..].trim()),
        ),
        None => (remainder, None),
    };

    let select = parse_select_list(select_text)?;
    let conditions = match condition_text {
        Some(condition_text) => Some(parse_conditions(condition_text)?),
        None => None,
    };

    Ok(ParsedQuery {
        select,
        table: TableName(table_text.to_string()),
        conditions,
        input: text.to_string(),
    })
}

fn parse_select_list(text: &str) -> Result<SelectList, SyntaxError> {
    let text = text.trim();

    if text == "*" {
        return Ok(SelectList::Star);
    }

    let columns: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        return Err(SyntaxError::new("the select list is empty"));
    }

    Ok(SelectList::Columns(columns))
}

/// Scans the WHERE tokens left to right.
///
/// `AND`/`OR` stand alone; anything else must be the start of a
/// `column operator literal` triple. There is no look-ahead beyond that,
/// and no parenthesis or unary-operator support.
fn parse_conditions(text: &str) -> Result<Vec<ConditionEntry>, SyntaxError> {
    let tokens = tokens::tokenize(text)?;

    let mut entries = Vec::new();
    let mut at = 0;

    while at < tokens.len() {
        let token = &tokens[at];

        if token.eq_ignore_ascii_case("and") {
            entries.push(ConditionEntry::Combinator(LogicalOp::And));
            at += 1;
            continue;
        }
        if token.eq_ignore_ascii_case("or") {
            entries.push(ConditionEntry::Combinator(LogicalOp::Or));
            at += 1;
            continue;
        }

        if at + 2 >= tokens.len() {
            return Err(SyntaxError::new("malformed WHERE condition"));
        }

        let operator = &tokens[at + 1];
        let comparison = Comparison::from_token(operator)
            .ok_or_else(|| SyntaxError::new(format!("invalid operator '{operator}' in WHERE")))?;

        entries.push(ConditionEntry::Condition(Condition {
            column: token.clone(),
            comparison,
            literal: tokens[at + 2].clone(),
        }));
        at += 3;
    }

    Ok(entries)
}

/// A query, structured. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub select: SelectList,
    pub table: TableName,
    pub conditions: Option<Vec<ConditionEntry>>,
    /// The query as the user typed it, kept for logging.
    pub input: String,
}

/// `Star` only comes out of a select list that is exactly `*`. A stray `*`
/// inside a column list is kept as a column name and will fail later as an
/// unknown column, so the two shapes never mix silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    Star,
    Columns(Vec<String>),
}

/// A flat alternating sequence of these makes up the WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionEntry {
    Condition(Condition),
    Combinator(LogicalOp),
}

/// One `column operator literal` predicate.
///
/// The column keeps its original spelling; it is case-normalized at
/// evaluation time, not here. The literal is already unquoted by the
/// tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub comparison: Comparison,
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(pub String);

impl TableName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct SyntaxError(String);

impl SyntaxError {
    pub(crate) fn new<M: Into<String>>(message: M) -> Self {
        SyntaxError(message.into())
    }
}

impl Comparison {
    fn from_token(token: &str) -> Option<Comparison> {
        let comparison = match token {
            "=" => Comparison::Equals,
            "!=" => Comparison::NotEquals,
            ">" => Comparison::GreaterThan,
            ">=" => Comparison::GreaterOrEqual,
            "<" => Comparison::LesserThan,
            "<=" => Comparison::LesserOrEqual,
            _ => return None,
        };

        Some(comparison)
    }
}
