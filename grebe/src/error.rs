//! Error-handling module for the crate

use thiserror::Error;

/// Error-collection for all the possible errors occurring in this crate.
///
/// Out-of-bounds indexing is not represented here: like the standard
/// library's containers, columns panic at the offending access site.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A type-erased column was asked to hold or reveal a value of the
    /// wrong element type. This is a caller bug rather than a
    /// data-dependent condition and is never recovered automatically.
    #[error("column stores elements of type {stored}, but {requested} was requested")]
    ColumnTypeMismatch {
        /// Name of the element type held by the column
        stored: &'static str,
        /// Name of the element type the caller asked for
        requested: &'static str,
    },
    /// The average of a column with no elements was requested
    #[error("cannot compute the average of an empty column")]
    EmptyAverage,
    /// A floating point value was NaN or infinite
    #[error("floating point values in this library must be finite")]
    NonFiniteFloat,
}
