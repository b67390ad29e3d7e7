//! This module defines [ColumnWindow].

use std::{ops::Range, sync::Arc};

use crate::{datatypes::ColumnType, management::ByteSized};

use super::{Column, ColumnEnum, ColumnIter};

/// Implementation of [Column] that provides a zero-copy view of a
/// contiguous index range of an underlying column.
///
/// Nested windows are collapsed at construction time: the underlying
/// column of a [ColumnWindow] is never itself a window, and the stored
/// range addresses the ultimate non-window ancestor directly. Reading
/// through a window is therefore always a single indirection.
#[derive(Debug, Clone)]
pub struct ColumnWindow<T: ColumnType> {
    underlying: Arc<ColumnEnum<T>>,
    range: Range<usize>,
}

impl<T: ColumnType> ColumnWindow<T> {
    /// Constructs a new [ColumnWindow] over the given `range` of
    /// `underlying`.
    ///
    /// If `underlying` is itself a window, `range` is interpreted relative
    /// to it and composed with its range, so the new window references the
    /// other window's underlying column instead.
    ///
    /// # Panics
    /// Panics if `range` does not lie within `underlying`.
    pub fn new(underlying: Arc<ColumnEnum<T>>, range: Range<usize>) -> ColumnWindow<T> {
        assert!(
            range.start <= range.end && range.end <= underlying.len(),
            "window {range:?} does not fit a column of length {}",
            underlying.len()
        );

        if let ColumnEnum::Window(window) = &*underlying {
            let collapsed = window.range.start + range.start..window.range.start + range.end;
            return ColumnWindow {
                underlying: Arc::clone(&window.underlying),
                range: collapsed,
            };
        }

        ColumnWindow { underlying, range }
    }

    /// Returns the window's index range into the underlying column.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the column this window is a view of.
    pub fn underlying(&self) -> &ColumnEnum<T> {
        &self.underlying
    }
}

impl<'a, T: 'a + ColumnType> Column<'a, T> for ColumnWindow<T> {
    type Scan = ColumnIter<'a, T>;

    fn len(&self) -> usize {
        self.range.len()
    }

    fn get(&self, index: usize) -> T {
        assert!(
            index < self.len(),
            "index {index} is out of bounds for a column of length {}",
            self.len()
        );

        self.underlying.get(self.range.start + index)
    }

    fn iter(&'a self) -> Self::Scan {
        ColumnIter::new(&self.underlying, self.range.clone())
    }
}

impl<T: ColumnType> ByteSized for ColumnWindow<T> {
    fn size_bytes(&self) -> u64 {
        // the underlying column is shared; its bytes are attributed to its owner
        size_of::<Self>() as u64
    }
}
