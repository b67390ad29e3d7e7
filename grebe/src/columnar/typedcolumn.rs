//! This module defines [TypedColumn].

use std::{
    hash::{Hash, Hasher},
    ops::Range,
    sync::Arc,
};

use delegate::delegate;
use num::Zero;

use crate::{
    datatypes::{ColumnType, Double, ToDouble},
    error::Error,
    management::ByteSized,
};

use super::column::{
    constant::ColumnConstant, vector::ColumnVector, window::ColumnWindow, Column, ColumnEnum,
    ColumnIter,
};

/// A statically-typed column of homogeneous values with value semantics.
///
/// Cloning a [TypedColumn] is cheap: clones share the underlying storage,
/// and no operation ever mutates storage that another handle can observe.
/// Equality and hashing consider only the logical sequence of elements,
/// never the backing representation.
#[derive(Debug, Clone)]
pub struct TypedColumn<T: ColumnType> {
    storage: Arc<ColumnEnum<T>>,
}

impl<T: ColumnType> TypedColumn<T> {
    /// Constructs a new [TypedColumn] holding the given values in a dense
    /// representation.
    pub fn new(values: Vec<T>) -> TypedColumn<T> {
        Self::from_storage(ColumnEnum::Vector(ColumnVector::new(values)))
    }

    /// Constructs a [TypedColumn] denoting `len` repetitions of `value`
    /// without materializing them.
    pub fn constant(value: T, len: usize) -> TypedColumn<T> {
        Self::from_storage(ColumnEnum::Constant(ColumnConstant::new(value, len)))
    }

    pub(crate) fn from_storage(storage: ColumnEnum<T>) -> TypedColumn<T> {
        Self::from_shared(Arc::new(storage))
    }

    pub(crate) fn from_shared(storage: Arc<ColumnEnum<T>>) -> TypedColumn<T> {
        TypedColumn { storage }
    }

    pub(crate) fn into_shared(self) -> Arc<ColumnEnum<T>> {
        self.storage
    }

    delegate! {
        to self.storage {
            /// Returns the number of elements in the column.
            pub fn len(&self) -> usize;
            /// Returns true iff the column holds no elements.
            pub fn is_empty(&self) -> bool;
            /// Returns the element at the given index.
            ///
            /// # Panics
            /// Panics if `index` is out of bounds.
            pub fn get(&self, index: usize) -> T;
        }
    }

    /// Returns an iterator over the elements of the column.
    pub fn iter(&self) -> ColumnIter<'_, T> {
        self.storage.iter()
    }

    /// Returns a zero-copy view of the given index range of this column.
    ///
    /// Windows of windows collapse to a single window over the ultimate
    /// backing column, so stacking views never deepens indirection.
    ///
    /// # Panics
    /// Panics if `range` does not lie within the column.
    pub fn window(&self, range: Range<usize>) -> TypedColumn<T> {
        Self::from_storage(ColumnEnum::Window(ColumnWindow::new(
            Arc::clone(&self.storage),
            range,
        )))
    }

    /// Applies `transform` to every element in order, producing a new
    /// column of the results.
    ///
    /// The result is always densely stored, even when this column is not.
    pub fn map<U: ColumnType>(&self, transform: impl FnMut(T) -> U) -> TypedColumn<U> {
        TypedColumn::new(self.iter().map(transform).collect())
    }

    /// Like [TypedColumn::map], but `transform` may fail. The first
    /// failure is returned as is, the remaining elements are not visited,
    /// and no partial column is surfaced.
    pub fn try_map<U: ColumnType, E>(
        &self,
        transform: impl FnMut(T) -> Result<U, E>,
    ) -> Result<TypedColumn<U>, E> {
        Ok(TypedColumn::new(
            self.iter().map(transform).collect::<Result<_, E>>()?,
        ))
    }

    /// Left-fold over the elements in index order.
    ///
    /// The fold visits all `len` logical elements regardless of the
    /// backing representation.
    pub fn reduce<A>(&self, initial: A, combine: impl FnMut(A, T) -> A) -> A {
        self.iter().fold(initial, combine)
    }

    /// Like [TypedColumn::reduce], but `combine` may fail. The first
    /// failure is returned as is and the fold is abandoned.
    pub fn try_reduce<A, E>(
        &self,
        initial: A,
        combine: impl FnMut(A, T) -> Result<A, E>,
    ) -> Result<A, E> {
        self.iter().try_fold(initial, combine)
    }
}

impl<T: ColumnType + Zero> TypedColumn<T> {
    /// Returns the sum of all elements, or zero for an empty column.
    pub fn sum(&self) -> T {
        self.reduce(T::zero(), |accumulator, value| accumulator + value)
    }
}

impl<T: ColumnType + Zero + ToDouble> TypedColumn<T> {
    /// Returns the arithmetic mean of the elements as a [Double].
    ///
    /// # Errors
    /// Returns [Error::EmptyAverage] for an empty column, and
    /// [Error::NonFiniteFloat] if the mean cannot be represented as a
    /// finite double.
    pub fn avg(&self) -> Result<Double, Error> {
        if self.is_empty() {
            return Err(Error::EmptyAverage);
        }

        Double::new(self.sum().to_double() / self.len() as f64)
    }
}

impl<T: ColumnType> PartialEq for TypedColumn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<T: ColumnType> Eq for TypedColumn<T> {}

impl<T: ColumnType> Hash for TypedColumn<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage.hash(state)
    }
}

impl<T: ColumnType> From<Vec<T>> for TypedColumn<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T: ColumnType> FromIterator<T> for TypedColumn<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: ColumnType> ByteSized for TypedColumn<T> {
    fn size_bytes(&self) -> u64 {
        self.storage.size_bytes()
    }
}
