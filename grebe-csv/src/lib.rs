//! Schema sniffing for delimiter-separated tabular text, and
//! schema-driven materialization of type-erased column buffers.
//!
//! Tabular text files rarely announce their separator, their header row,
//! or their column types. [sniff_schema][sniffer::sniff_schema] guesses
//! all three from the raw bytes, and [read_columns][reader::read_columns]
//! turns the bytes plus a guess into columns of the storage core, one
//! [AnyColumnBuffer][grebe::columnar::buffer::AnyColumnBuffer] per column.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod error;
pub mod reader;
pub mod schema;
pub mod sniffer;
