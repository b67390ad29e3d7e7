//! This module defines the trait [ToDouble].

/// Types whose values can be viewed as a double-precision float, enabling
/// floating-point aggregates over columns of such elements.
pub trait ToDouble {
    /// Return the value as an [f64].
    fn to_double(&self) -> f64;
}

impl ToDouble for i32 {
    fn to_double(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToDouble for u32 {
    fn to_double(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToDouble for i64 {
    fn to_double(&self) -> f64 {
        *self as f64
    }
}

impl ToDouble for u64 {
    fn to_double(&self) -> f64 {
        *self as f64
    }
}
