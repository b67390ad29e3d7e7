//! This module defines the trait [Column] and its implementations,
//! as well as [ColumnEnum],
//! which collects all implementations of [Column] into a single object.

pub mod constant;
pub mod vector;
pub mod window;

use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
    ops::Range,
};

use delegate::delegate;

use crate::{datatypes::ColumnType, management::ByteSized};

use self::{constant::ColumnConstant, vector::ColumnVector, window::ColumnWindow};

/// A trait representing a column of data, where each entry is of type `T`.
pub trait Column<'a, T>: Debug + Clone + ByteSized {
    /// Iterator type returned by [Column::iter]
    type Scan: 'a + Iterator<Item = T>;

    /// Returns the number of entries in the column.
    fn len(&self) -> usize;

    /// Returns true iff the column is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    fn get(&self, index: usize) -> T;

    /// Returns an iterator over the logical elements of this column.
    fn iter(&'a self) -> Self::Scan;
}

/// Enum for column implementations
///
/// Which representation backs a column is an implementation detail, not
/// observable state: equality and hashing consider only the logical
/// sequence of elements, so differently-represented columns with the same
/// contents compare equal and hash alike.
#[derive(Debug, Clone)]
pub enum ColumnEnum<T: ColumnType> {
    /// Case ColumnVector
    Vector(ColumnVector<T>),
    /// Case ColumnConstant
    Constant(ColumnConstant<T>),
    /// Case ColumnWindow
    Window(ColumnWindow<T>),
}

impl<T: ColumnType> ColumnEnum<T> {
    /// Returns the number of elements the column can hold without
    /// allocating new storage.
    ///
    /// Only [ColumnVector] carries spare capacity; for the other
    /// representations this equals the length.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Vector(column) => column.capacity(),
            Self::Constant(column) => column.len(),
            Self::Window(column) => column.len(),
        }
    }
}

impl<'a, T: 'a + ColumnType> Column<'a, T> for ColumnEnum<T> {
    type Scan = ColumnIter<'a, T>;

    delegate! {
        to match self {
            ColumnEnum::Vector(column) => column,
            ColumnEnum::Constant(column) => column,
            ColumnEnum::Window(column) => column,
        } {
            fn len(&self) -> usize;
            fn is_empty(&self) -> bool;
            fn get(&self, index: usize) -> T;
        }
    }

    fn iter(&'a self) -> Self::Scan {
        ColumnIter::new(self, 0..self.len())
    }
}

impl<T: ColumnType> PartialEq for ColumnEnum<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: ColumnType> Eq for ColumnEnum<T> {}

impl<T: ColumnType> Hash for ColumnEnum<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: ColumnType> ByteSized for ColumnEnum<T> {
    fn size_bytes(&self) -> u64 {
        let size_column = match self {
            Self::Vector(column) => column.size_bytes(),
            Self::Constant(column) => column.size_bytes(),
            Self::Window(column) => column.size_bytes(),
        };
        size_of::<Self>() as u64 + size_column
    }
}

/// Iterator over the logical elements of a [ColumnEnum], restricted to an
/// interval of indices.
#[derive(Debug)]
pub struct ColumnIter<'a, T: ColumnType> {
    column: &'a ColumnEnum<T>,
    interval: Range<usize>,
}

impl<'a, T: ColumnType> ColumnIter<'a, T> {
    /// Constructs a new [ColumnIter] over the given interval of `column`.
    pub(crate) fn new(column: &'a ColumnEnum<T>, interval: Range<usize>) -> Self {
        debug_assert!(interval.start <= interval.end && interval.end <= column.len());

        Self { column, interval }
    }
}

impl<'a, T: ColumnType> Iterator for ColumnIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.interval.start < self.interval.end {
            let value = self.column.get(self.interval.start);
            self.interval.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.interval.len();
        (remaining, Some(remaining))
    }
}

impl<'a, T: ColumnType> ExactSizeIterator for ColumnIter<'a, T> {}

#[cfg(test)]
mod test {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::Arc;

    use test_log::test;

    use super::{
        constant::ColumnConstant, vector::ColumnVector, window::ColumnWindow, Column, ColumnEnum,
    };

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn representations_with_equal_content_are_equal() {
        let dense = ColumnEnum::Vector(ColumnVector::new(vec![7_u64, 7, 7]));
        let constant = ColumnEnum::Constant(ColumnConstant::new(7_u64, 3));
        let window = ColumnEnum::Window(ColumnWindow::new(
            Arc::new(ColumnEnum::Vector(ColumnVector::new(vec![1_u64, 7, 7, 7, 2]))),
            1..4,
        ));

        assert_eq!(dense, constant);
        assert_eq!(dense, window);
        assert_eq!(constant, window);

        assert_eq!(hash_of(&dense), hash_of(&constant));
        assert_eq!(hash_of(&dense), hash_of(&window));
    }

    #[test]
    fn representations_agree_on_len_and_get() {
        let dense = ColumnEnum::Vector(ColumnVector::new(vec![7_u64, 7, 7]));
        let constant = ColumnEnum::Constant(ColumnConstant::new(7_u64, 3));

        assert_eq!(dense.len(), constant.len());
        for index in 0..dense.len() {
            assert_eq!(dense.get(index), constant.get(index));
        }
    }

    #[test]
    fn unequal_columns_compare_unequal() {
        let short = ColumnEnum::Vector(ColumnVector::new(vec![1_u64, 2]));
        let long = ColumnEnum::Vector(ColumnVector::new(vec![1_u64, 2, 3]));
        let other = ColumnEnum::Vector(ColumnVector::new(vec![1_u64, 9]));

        assert_ne!(short, long);
        assert_ne!(short, other);
    }

    #[test]
    fn iterate_column() {
        let column = ColumnEnum::Vector(ColumnVector::new(vec![1_u64, 2, 5]));

        assert_eq!(column.iter().collect::<Vec<_>>(), vec![1, 2, 5]);
        assert_eq!(column.iter().len(), 3);
    }
}
