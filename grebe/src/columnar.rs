//! This module collects the column storage representations, the typed
//! column handle built over them, and the type-erased buffer that lets
//! columns of different element types live in one collection.

/// Module for defining [AnyColumnBuffer][buffer::AnyColumnBuffer]
pub mod buffer;
/// Module for defining [Column][column::Column] and its implementations
pub mod column;
/// Module for defining [TypedColumn][typedcolumn::TypedColumn]
pub mod typedcolumn;
