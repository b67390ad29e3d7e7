//! This crate defines the storage core of a columnar data-table library:
//! value-semantic typed columns over interchangeable physical
//! representations, and a type-erased, copy-on-write buffer that lets
//! columns of different element types live together in one collection
//! without giving up type safety at the point of use.

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

pub mod columnar;
pub mod datatypes;
pub mod error;
pub mod management;
