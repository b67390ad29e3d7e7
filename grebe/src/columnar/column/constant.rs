//! This module defines [ColumnConstant].

use std::iter;

use crate::{datatypes::ColumnType, management::ByteSized};

use super::Column;

/// Implementation of [Column] that represents a single value repeated a
/// fixed number of times, without materializing the repetitions.
#[derive(Debug, Clone)]
pub struct ColumnConstant<T> {
    value: T,
    len: usize,
}

impl<T: ColumnType> ColumnConstant<T> {
    /// Constructs a new [ColumnConstant] denoting `len` repetitions of
    /// `value`.
    pub fn new(value: T, len: usize) -> ColumnConstant<T> {
        ColumnConstant { value, len }
    }
}

impl<'a, T: 'a + ColumnType> Column<'a, T> for ColumnConstant<T> {
    type Scan = iter::RepeatN<T>;

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> T {
        assert!(
            index < self.len,
            "index {index} is out of bounds for a column of length {}",
            self.len
        );

        self.value.clone()
    }

    fn iter(&'a self) -> Self::Scan {
        iter::repeat_n(self.value.clone(), self.len)
    }
}

impl<T> ByteSized for ColumnConstant<T> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::{Column, ColumnConstant};

    #[test]
    fn reports_the_value_at_every_index() {
        let column = ColumnConstant::new(42_u64, 3);

        assert_eq!(column.len(), 3);
        for index in 0..column.len() {
            assert_eq!(column.get(index), 42);
        }
    }

    #[test]
    fn iterates_the_value_len_times() {
        let column = ColumnConstant::new("x".to_owned(), 4);

        assert_eq!(column.iter().collect::<Vec<_>>(), vec!["x"; 4]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_get_panics() {
        let column = ColumnConstant::new(42_u64, 3);
        let _ = column.get(3);
    }

    #[test]
    fn empty_constant_column() {
        let column = ColumnConstant::new(42_u64, 0);

        assert!(column.is_empty());
        assert_eq!(column.iter().count(), 0);
    }
}
