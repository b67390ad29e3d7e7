//! This module defines the trait [ByteSized],
//! which should be implemented by types that can
//! calculate their own size.

/// Objects that are able to calculate their current approximate size in bytes.
///
/// We use `u64` rather than `usize` here to avoid overflows in case of
/// overestimations.
pub trait ByteSized {
    /// Return the number of bytes this object consumes
    fn size_bytes(&self) -> u64;
}

/// Computes the memory required for managing the content of a vector using
/// only the direct size of content objects, without taking into account any
/// data they might point to.
pub(crate) fn size_inner_vec_flat<T>(object: &Vec<T>) -> u64 {
    object.capacity() as u64 * size_of::<T>() as u64
}
