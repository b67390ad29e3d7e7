//! This module defines [AnyColumnStorage] and [AnyColumnBuffer],
//! the type-erasure boundary of the storage layer.

use std::{
    any::{Any, TypeId},
    cmp,
    fmt::Debug,
    sync::Arc,
};

use delegate::delegate;

use crate::{datatypes::ColumnType, error::Error, management::ByteSized};

use super::{
    column::{vector::ColumnVector, Column, ColumnEnum},
    typedcolumn::TypedColumn,
};

/// Capability required of a column storage so that it can back an
/// [AnyColumnBuffer] without knowledge of its element type.
///
/// The value offered to the append operations travels in a `&mut dyn Any`
/// slot holding an `Option` of the element type. Implementations take the
/// value out of the slot only on a path that succeeds, so a failed append
/// leaves both the storage and the slot untouched.
pub trait AnyColumnStorage: Debug + Send + Sync + ByteSized {
    /// Returns the token identifying the element type of this storage.
    fn element_type(&self) -> TypeId;

    /// Returns the name of the element type, for diagnostics only.
    /// Type identity is always decided by [AnyColumnStorage::element_type],
    /// never by comparing names.
    fn element_type_name(&self) -> &'static str;

    /// Returns the number of elements in the storage.
    fn len(&self) -> usize;

    /// Returns true iff the storage holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the storage can hold without
    /// allocating new storage.
    fn capacity(&self) -> usize;

    /// Appends the value held in `slot` into spare capacity, returning the
    /// index of the new element.
    ///
    /// Returns [None], with the storage and `slot` unchanged, when there is
    /// no spare capacity or the representation does not support in-place
    /// growth.
    fn append_in_place(&mut self, slot: &mut dyn Any) -> Option<usize>;

    /// Returns a new storage holding all current elements followed by the
    /// value in `slot`. The new storage is always densely represented.
    ///
    /// With `grow` set, the new storage reserves geometrically more room
    /// than the current capacity; otherwise the current capacity is
    /// carried over.
    fn append_copying(&self, slot: &mut dyn Any, grow: bool) -> Arc<dyn AnyColumnStorage>;

    /// Returns self as a shared [Any] handle, for checked downcasting.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: ColumnType> AnyColumnStorage for ColumnEnum<T> {
    fn element_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn element_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn len(&self) -> usize {
        Column::len(self)
    }

    fn capacity(&self) -> usize {
        ColumnEnum::capacity(self)
    }

    fn append_in_place(&mut self, slot: &mut dyn Any) -> Option<usize> {
        let slot = slot
            .downcast_mut::<Option<T>>()
            .expect("the buffer verifies the element type before appending");

        match self {
            ColumnEnum::Vector(column) if Column::len(column) < column.capacity() => {
                let value = slot.take().expect("the slot holds the value to append");
                Some(column.push(value))
            }
            // constant and window representations carry no spare capacity,
            // so appending to them always goes through the copying path
            _ => None,
        }
    }

    fn append_copying(&self, slot: &mut dyn Any, grow: bool) -> Arc<dyn AnyColumnStorage> {
        let slot = slot
            .downcast_mut::<Option<T>>()
            .expect("the buffer verifies the element type before appending");
        let value = slot.take().expect("the slot holds the value to append");

        let len = Column::len(self);
        let capacity = if grow {
            // growth factor 2 keeps repeated appends amortized constant
            cmp::max(2 * self.capacity(), len + 1)
        } else {
            cmp::max(self.capacity(), len + 1)
        };

        let mut column = ColumnVector::with_capacity(capacity);
        for element in self.iter() {
            column.push(element);
        }
        column.push(value);

        Arc::new(ColumnEnum::Vector(column))
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A sharable, copy-on-write buffer over a type-erased column storage.
///
/// Buffers of columns with different element types have the same type, so
/// they can be held together in one collection; recovering the typed
/// column is a checked downcast against the element-type token.
///
/// Multiple buffers (and [TypedColumn]s) may share one storage object.
/// Appending through a buffer whose storage is shared forks the storage
/// first, so the mutation is never observable through any other handle;
/// appending through a uniquely-held buffer with spare capacity mutates in
/// place without allocating.
#[derive(Debug, Clone)]
pub struct AnyColumnBuffer {
    storage: Arc<dyn AnyColumnStorage>,
}

impl AnyColumnBuffer {
    delegate! {
        to self.storage {
            /// Returns the token identifying the element type of the column.
            pub fn element_type(&self) -> TypeId;
            /// Returns the name of the element type, for diagnostics only.
            pub fn element_type_name(&self) -> &'static str;
            /// Returns the number of elements in the column.
            pub fn len(&self) -> usize;
            /// Returns true iff the column holds no elements.
            pub fn is_empty(&self) -> bool;
            /// Returns the number of elements the column can hold without
            /// allocating new storage.
            pub fn capacity(&self) -> usize;
        }
    }

    /// Appends `value`, returning the index of the appended element.
    ///
    /// Amortized constant time: the element is written into spare capacity
    /// whenever this buffer is the sole holder of its storage, and the
    /// storage is forked (growing geometrically when capacity ran out)
    /// otherwise.
    ///
    /// # Errors
    /// Returns [Error::ColumnTypeMismatch] if `T` is not the buffer's
    /// element type. The buffer is left untouched.
    pub fn push<T: ColumnType>(&mut self, value: T) -> Result<usize, Error> {
        if TypeId::of::<T>() != self.element_type() {
            return Err(Error::ColumnTypeMismatch {
                stored: self.element_type_name(),
                requested: std::any::type_name::<T>(),
            });
        }

        let mut slot: Option<T> = Some(value);

        // Arc::get_mut grants mutable access iff the reference count is
        // exactly one, as a single atomic decision. Two buffers racing to
        // append onto the same shared storage both observe "not unique"
        // and both take the copying path below.
        if let Some(storage) = Arc::get_mut(&mut self.storage) {
            if let Some(index) = storage.append_in_place(&mut slot) {
                return Ok(index);
            }
        }

        let grow = self.len() == self.capacity();
        log::trace!(
            "append forks column storage of length {} (capacity {}, grow: {grow})",
            self.len(),
            self.capacity()
        );
        self.storage = self.storage.append_copying(&mut slot, grow);

        Ok(self.len() - 1)
    }

    /// Recovers the statically-typed column, sharing this buffer's
    /// storage.
    ///
    /// # Errors
    /// Returns [Error::ColumnTypeMismatch] if the buffer does not hold
    /// elements of type `T`. Bytes are never reinterpreted.
    pub fn downcast<T: ColumnType>(&self) -> Result<TypedColumn<T>, Error> {
        match Arc::clone(&self.storage)
            .into_any_arc()
            .downcast::<ColumnEnum<T>>()
        {
            Ok(storage) => Ok(TypedColumn::from_shared(storage)),
            Err(_) => Err(Error::ColumnTypeMismatch {
                stored: self.element_type_name(),
                requested: std::any::type_name::<T>(),
            }),
        }
    }
}

impl<T: ColumnType> From<TypedColumn<T>> for AnyColumnBuffer {
    fn from(column: TypedColumn<T>) -> Self {
        AnyColumnBuffer {
            storage: column.into_shared(),
        }
    }
}

impl ByteSized for AnyColumnBuffer {
    fn size_bytes(&self) -> u64 {
        self.storage.size_bytes()
    }
}

#[cfg(test)]
mod test {
    use rand::Rng;
    use test_log::test;

    use crate::columnar::typedcolumn::TypedColumn;
    use crate::error::Error;

    use super::AnyColumnBuffer;

    fn buffer_of(values: Vec<i64>) -> AnyColumnBuffer {
        AnyColumnBuffer::from(TypedColumn::new(values))
    }

    #[test]
    fn push_returns_consecutive_indices() {
        let mut buffer = buffer_of(vec![1, 2, 3]);

        assert_eq!(buffer.push(4_i64), Ok(3));
        assert_eq!(buffer.push(5_i64), Ok(4));
        assert_eq!(buffer.len(), 5);
        assert_eq!(
            buffer.downcast::<i64>().unwrap(),
            TypedColumn::new(vec![1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn push_of_the_wrong_type_fails_without_mutating() {
        let mut buffer = buffer_of(vec![1, 2, 3]);

        let result = buffer.push("nope".to_owned());
        assert!(matches!(result, Err(Error::ColumnTypeMismatch { .. })));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn downcast_to_the_wrong_type_fails() {
        let buffer = buffer_of(vec![1, 2, 3]);

        let result = buffer.downcast::<String>();
        assert!(matches!(result, Err(Error::ColumnTypeMismatch { .. })));
    }

    #[test]
    fn fork_on_share() {
        let mut appended = buffer_of(vec![1, 2, 3]);
        let shared = appended.clone();

        assert_eq!(appended.push(4_i64), Ok(3));

        // the sibling handle keeps seeing the original, unmodified column
        assert_eq!(appended.len(), 4);
        assert_eq!(shared.len(), 3);
        assert_eq!(
            shared.downcast::<i64>().unwrap(),
            TypedColumn::new(vec![1, 2, 3])
        );
        assert_eq!(
            appended.downcast::<i64>().unwrap(),
            TypedColumn::new(vec![1, 2, 3, 4])
        );
    }

    #[test]
    fn appending_never_changes_a_downcast_column() {
        let mut buffer = buffer_of(vec![1, 2, 3]);
        let column = buffer.downcast::<i64>().unwrap();

        for value in 4..32_i64 {
            buffer.push(value).unwrap();
        }

        assert_eq!(column, TypedColumn::new(vec![1, 2, 3]));
    }

    #[test]
    fn erasing_a_column_preserves_value_semantics() {
        let column = TypedColumn::new(vec![1_i64, 2, 3]);
        let mut buffer = AnyColumnBuffer::from(column.clone());

        buffer.push(4_i64).unwrap();

        assert_eq!(column.len(), 3);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn capacity_grows_geometrically() {
        let mut rng = rand::thread_rng();
        let mut buffer = buffer_of(Vec::new());
        let mut capacities = vec![buffer.capacity()];

        for _ in 0..512 {
            buffer.push(rng.gen_range(-1_000..1_000_i64)).unwrap();
            let capacity = buffer.capacity();
            if capacity != *capacities.last().expect("seeded with one entry") {
                capacities.push(capacity);
            }
        }

        assert_eq!(buffer.len(), 512);
        // doubling from capacity zero reaches 512 elements in about
        // log2(512) steps; linear growth would show hundreds of
        // reallocations and quadratic total copying
        assert!(
            capacities.len() <= 12,
            "expected geometric growth, saw capacities {capacities:?}"
        );
    }

    #[test]
    fn unique_buffers_append_in_place() {
        let mut buffer = buffer_of(Vec::new());
        for value in 0..5_i64 {
            buffer.push(value).unwrap();
        }

        // doubling leaves spare room after the fifth push; filling it up
        // must not reallocate
        let capacity = buffer.capacity();
        assert!(capacity > buffer.len());
        while buffer.len() < capacity {
            buffer.push(0_i64).unwrap();
        }
        assert_eq!(buffer.capacity(), capacity);

        // the next push exhausts capacity and must reallocate
        buffer.push(7_i64).unwrap();
        assert!(buffer.capacity() > capacity);
    }

    #[test]
    fn sharing_induced_forks_preserve_capacity() {
        let mut buffer = buffer_of(Vec::new());
        for value in 0..5_i64 {
            buffer.push(value).unwrap();
        }
        let capacity = buffer.capacity();
        assert!(capacity > buffer.len());

        let shared = buffer.clone();
        buffer.push(5_i64).unwrap();

        // forked because of sharing, not capacity, so no growth happens
        assert_eq!(buffer.capacity(), capacity);
        assert_eq!(shared.len(), 5);
    }

    #[test]
    fn concurrent_appends_to_shared_storage_both_fork() {
        let base = buffer_of(vec![1, 2, 3]);

        std::thread::scope(|scope| {
            let handles = [10_i64, 11].map(|value| {
                let mut buffer = base.clone();
                scope.spawn(move || {
                    buffer.push(value).unwrap();
                    (value, buffer.downcast::<i64>().unwrap())
                })
            });

            // both writers raced on shared storage, so both must have
            // forked and appended their own value only
            for handle in handles {
                let (value, column) = handle.join().expect("worker panicked");
                assert_eq!(column, TypedColumn::new(vec![1, 2, 3, value]));
            }
        });

        assert_eq!(base.len(), 3);
    }

    #[test]
    fn heterogeneous_buffers_share_a_collection() {
        let ints = AnyColumnBuffer::from(TypedColumn::new(vec![1_i64, 2]));
        let strings = AnyColumnBuffer::from(TypedColumn::new(vec!["a".to_owned()]));
        let table = vec![ints, strings];

        assert!(table[0].downcast::<i64>().is_ok());
        assert!(table[0].downcast::<String>().is_err());
        assert!(table[1].downcast::<String>().is_ok());
        assert_ne!(table[0].element_type(), table[1].element_type());
    }
}
