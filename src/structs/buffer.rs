//! # **Buffer** - *Shared read-only element storage*
//!
//! Buffer backs every `ArrayValue` in *Rankflow*.
//!
//! # Design
//! `Buffer<T>` is a reference-counted handle to an owned [`Vec64<T>`], an
//! internally aligned, 64-byte, heap-allocated vector optimised for SIMD
//! kernels.
//! - Cloning is O(1) and shares the allocation, so a value propagated
//!   unmodified through an expression tree is never copied.
//! - There is no mutable access. Kernels write into a fresh `Vec64<T>` and
//!   freeze it into a `Buffer` once complete.
//! - `into_vec64` hands back the allocation when the handle is unique and
//!   clones otherwise, which is the copy-on-write escape hatch for hosts that
//!   want to reuse memory.
//!
//! This type is Send + Sync (subject to `T`) and dereferences to `&[T]`.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use vec64::Vec64;

/// # Buffer
///
/// Immutable, shared, 64-byte aligned element buffer.
pub struct Buffer<T> {
    data: Arc<Vec64<T>>,
}

impl<T> Buffer<T> {
    /// Construct from an owned Vec64<T>.
    #[inline]
    pub fn from_vec64(v: Vec64<T>) -> Self {
        Self { data: Arc::new(v) }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..]
    }

    /// True when both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Number of live handles on the allocation.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl<T: Clone> Buffer<T> {
    /// Construct an owned buffer from a slice, copying the data into an aligned Vec64.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        Buffer::from_vec64(Vec64::from(slice))
    }

    /// Recovers the owned vector, cloning only when the allocation is shared.
    #[inline]
    pub fn into_vec64(self) -> Vec64<T> {
        Arc::unwrap_or_clone(self.data)
    }
}

impl<T> Clone for Buffer<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Buffer<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_slice() == other.as_slice()
    }
}

impl<T> From<Vec64<T>> for Buffer<T> {
    #[inline]
    fn from(v: Vec64<T>) -> Self {
        Buffer::from_vec64(v)
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    #[inline]
    fn from(v: Vec<T>) -> Self {
        Buffer::from_vec64(Vec64::from(v))
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Buffer::from_vec64(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}
