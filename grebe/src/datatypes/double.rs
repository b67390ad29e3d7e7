//! This module defines a wrapper type [Double] for [f64] that excludes NaN
//! and infinity.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Sub},
};

use num::{One, Zero};

use crate::error::Error;

use super::to_double::ToDouble;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// Wrapper for [f64] that excludes [f64::NAN] and infinite values.
///
/// Ruling those values out restores the total order, reflexive equality,
/// and hashability that column elements require.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Double(f64);

impl Double {
    /// Wraps the given [f64]-`value` as a value over [Double].
    ///
    /// # Errors
    /// Returns [Error::NonFiniteFloat] if `value` is NaN or infinite.
    pub fn new(value: f64) -> Result<Self, Error> {
        if !value.is_finite() {
            return Err(Error::NonFiniteFloat);
        }

        Ok(Self(value))
    }

    /// Wraps the given [f64]-`value` as a value over [Double].
    ///
    /// # Panics
    /// Panics if `value` is NaN or not finite.
    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() {
            panic!("floating point values must be finite")
        }

        Self(value)
    }
}

impl Eq for Double {}

impl PartialOrd for Double {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Double {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .partial_cmp(&other.0)
            .expect("comparison can only fail on NaN values, which this type forbids")
    }
}

impl Hash for Double {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // +0.0 and -0.0 compare equal, so they must hash alike
        let bits = if self.0 == 0.0 {
            0f64.to_bits()
        } else {
            self.0.to_bits()
        };
        state.write_u64(bits);
    }
}

impl Add for Double {
    type Output = Double;

    fn add(self, rhs: Self) -> Self::Output {
        Double(self.0.add(rhs.0))
    }
}

impl AddAssign for Double {
    fn add_assign(&mut self, rhs: Self) {
        self.0.add_assign(rhs.0)
    }
}

impl Sub for Double {
    type Output = Double;

    fn sub(self, rhs: Self) -> Self::Output {
        Double(self.0.sub(rhs.0))
    }
}

impl Mul for Double {
    type Output = Double;

    fn mul(self, rhs: Self) -> Self::Output {
        Double(self.0.mul(rhs.0))
    }
}

impl Div for Double {
    type Output = Double;

    fn div(self, rhs: Self) -> Self::Output {
        Double(self.0.div(rhs.0))
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Double {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Double> for f64 {
    fn from(value: Double) -> Self {
        value.0
    }
}

impl Zero for Double {
    fn zero() -> Self {
        Double::from_number(f64::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Double {
    fn one() -> Self {
        Double::from_number(f64::one())
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl Sum for Double {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        Double::from_number(iter.map(|f| f.0).sum())
    }
}

impl ToDouble for Double {
    fn to_double(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
impl Arbitrary for Double {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self::from_number(value)
    }
}
