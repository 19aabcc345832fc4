//! # Shape Trait Module
//!
//! Unified way to describe the dimensionality "shape" of any value the
//! kernel handles.
//!
//! Shapes are closed over ranks 0 to 3, but include standard accessors for
//! 1d, 2d and 3d views so callers can skip the match when they already know
//! what they hold.

use crate::enums::shape_dim::ShapeDim;

/// Shape trait.
///
/// Returns a `ShapeDim` for the receiver.
///
/// Includes accessor types for common use cases e.g., shape_1d, shape_2d,
/// which are automatic provided the implementor implements `shape`.
pub trait Shape {
    /// Returns the shape of the receiver
    fn shape(&self) -> ShapeDim;

    /// Number of axes
    #[inline]
    fn rank(&self) -> usize {
        self.shape().rank()
    }

    /// Extents, outermost first
    #[inline]
    fn dims(&self) -> Vec<usize> {
        self.shape().dims()
    }

    /// Number of elements
    #[inline]
    fn size(&self) -> usize {
        self.shape().size()
    }

    /// Returns the first dimension shape
    ///
    /// A scalar reports `1`.
    fn shape_1d(&self) -> usize {
        match self.shape() {
            ShapeDim::Rank0 => 1,
            ShapeDim::Rank1(n) => n,
            ShapeDim::Rank2 { rows, .. } => rows,
            ShapeDim::Rank3 { pages, .. } => pages,
        }
    }

    /// Returns the first and second dimension shapes
    ///
    /// Missing trailing axes report `1`.
    fn shape_2d(&self) -> (usize, usize) {
        match self.shape() {
            ShapeDim::Rank0 => (1, 1),
            ShapeDim::Rank1(n) => (n, 1),
            ShapeDim::Rank2 { rows, cols } => (rows, cols),
            ShapeDim::Rank3 { pages, rows, .. } => (pages, rows),
        }
    }

    /// Returns the first, second and third dimension shapes
    ///
    /// Missing trailing axes report `1`.
    fn shape_3d(&self) -> (usize, usize, usize) {
        match self.shape() {
            ShapeDim::Rank0 => (1, 1, 1),
            ShapeDim::Rank1(n) => (n, 1, 1),
            ShapeDim::Rank2 { rows, cols } => (rows, cols, 1),
            ShapeDim::Rank3 { pages, rows, cols } => (pages, rows, cols),
        }
    }
}
