//! This module collects functionality specific to the supported element
//! datatypes.

/// Module for defining [ColumnType]
pub mod column_type;
pub use column_type::ColumnType;
/// Module for defining [Double]
pub mod double;
pub use double::Double;
/// Module for defining [ToDouble]
pub mod to_double;
pub use to_double::ToDouble;
