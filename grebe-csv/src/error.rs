//! Error-handling module for the crate

use thiserror::Error;

/// Error-collection for everything that can go wrong while sniffing a
/// schema or reading tabular text into columns.
#[derive(Error, Debug)]
pub enum ReadingError {
    /// The input ends before two complete lines, which is too little to
    /// guess a schema from
    #[error("the input ends before two complete lines; cannot guess a schema")]
    TooShort,
    /// The input is not valid UTF-8
    #[error(transparent)]
    NonUtf8(#[from] std::str::Utf8Error),
    /// A separator outside the single-byte range was requested
    #[error("separator {0:?} is not a single-byte character")]
    UnsupportedSeparator(char),
    /// Error occurred during parsing of int values
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
    /// Error occurred during parsing of double values
    #[error(transparent)]
    ParseFloat(#[from] std::num::ParseFloatError),
    /// Error produced by the underlying record reader
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Error raised by the column storage layer
    #[error(transparent)]
    Column(#[from] grebe::error::Error),
}
