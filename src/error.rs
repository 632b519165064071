use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Why a mandatory free-text field could not be read as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    NoInteger,
    /// Digits were present but do not fit in an `i64`.
    OutOfRange,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::NoInteger => f.write_str("no integer found"),
            ParseFailure::OutOfRange => f.write_str("integer out of range"),
        }
    }
}

/// A mandatory free-text field had no usable number in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} in {field} value {value:?}")]
pub struct ParseError {
    pub field: &'static str,
    pub value: String,
    pub reason: ParseFailure,
}

impl ParseError {
    pub fn new(field: &'static str, value: &str, reason: ParseFailure) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

/// Dataset preparation failed; no partial dataset is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: ParseError,
    },
}

/// Model fitting could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,
    #[error("{rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },
}

/// One or more query fields were left blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", fields.join(", "))]
pub struct MissingInputError {
    pub fields: Vec<&'static str>,
}
