//! This module defines the trait [ColumnType].

use std::{fmt::Debug, hash::Hash};

/// Trait implemented by all types that can appear as elements of a
/// [Column][crate::columnar::column::Column].
///
/// Columns compare and hash by logical content, which is where the
/// [Eq], [Ord], and [Hash] requirements come from; `Send + Sync + 'static`
/// is what the type-erased, thread-shared
/// [AnyColumnBuffer][crate::columnar::buffer::AnyColumnBuffer] additionally
/// needs.
pub trait ColumnType: Debug + Clone + Eq + Hash + Ord + Send + Sync + 'static {}
impl<T> ColumnType for T where T: Debug + Clone + Eq + Hash + Ord + Send + Sync + 'static {}
