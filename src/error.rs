use crate::engine::source::{ColumnNotFoundError, TableNotFoundError};
use crate::engine::SyntaxError;
use std::env::VarError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(value: E) -> Self {
        Error(Box::new(value.into()))
    }
}

#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorKind {
    /// The query text could not be understood.
    #[error("Invalid syntax, failed to parse:\n{0}")]
    SyntaxError(#[from] SyntaxError),
    /// The table reference did not resolve to any data source.
    #[error("Cannot run query:\n{0}")]
    TableNotFoundError(#[from] TableNotFoundError),
    /// A selected or filtered column is not part of the table.
    #[error("Cannot run query:\n{0}")]
    ColumnNotFoundError(#[from] ColumnNotFoundError),
    #[error("Internal error:\n{0}")]
    InternalError(#[from] InternalError),
    #[error("IO error:\n{0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error:\n{0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error:\n{0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Could not find environment variable: \n{0}")]
    EnvVarError(#[from] VarError),
    #[error("Error reading data from stdin")]
    DialogueError(#[from] dialoguer::Error),
}

#[derive(Error, Debug)]
pub struct InternalError(pub String);

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error {
    pub fn into_inner(self) -> ErrorKind {
        *self.0
    }
}
