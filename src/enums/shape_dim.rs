//! # ShapeDim Enum Module
//!
//! Companion to [crate::traits::shape::Shape];
//!
//! Contains all supported `Shape` variants. The rank ceiling of the kernel
//! is 3, so the enum is closed over ranks 0 through 3 and every dispatch
//! table in the crate matches it exhaustively.

use std::fmt;

use crate::enums::error::KernelError;
use crate::traits::shape::Shape;

/// Highest rank any `ArrayValue` may carry.
pub const MAX_RANK: usize = 3;

/// Dimensional rank and extents of an `ArrayValue`.
///
/// Storage is row-major: the last listed extent varies fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeDim {
    /// Scalar - always one element, no extents.
    Rank0,

    /// Vector length.
    Rank1(usize),

    /// Matrix with row/column counts.
    Rank2 { rows: usize, cols: usize },

    /// 3d tensor; `pages` is the leading axis.
    Rank3 { pages: usize, rows: usize, cols: usize },
}

impl ShapeDim {
    /// Builds a shape from an extent list, failing above rank 3.
    pub fn from_dims(dims: &[usize]) -> Result<Self, KernelError> {
        match *dims {
            [] => Ok(ShapeDim::Rank0),
            [n] => Ok(ShapeDim::Rank1(n)),
            [rows, cols] => Ok(ShapeDim::Rank2 { rows, cols }),
            [pages, rows, cols] => Ok(ShapeDim::Rank3 { pages, rows, cols }),
            _ => Err(KernelError::UnsupportedRank {
                rank: dims.len(),
                operation: "shape",
            }),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        match self {
            ShapeDim::Rank0 => 0,
            ShapeDim::Rank1(_) => 1,
            ShapeDim::Rank2 { .. } => 2,
            ShapeDim::Rank3 { .. } => 3,
        }
    }

    /// Extents as an owned list, outermost first.
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            ShapeDim::Rank0 => vec![],
            ShapeDim::Rank1(n) => vec![n],
            ShapeDim::Rank2 { rows, cols } => vec![rows, cols],
            ShapeDim::Rank3 { pages, rows, cols } => vec![pages, rows, cols],
        }
    }

    /// Product of extents. A scalar holds exactly one element.
    #[inline]
    pub fn size(&self) -> usize {
        match *self {
            ShapeDim::Rank0 => 1,
            ShapeDim::Rank1(n) => n,
            ShapeDim::Rank2 { rows, cols } => rows * cols,
            ShapeDim::Rank3 { pages, rows, cols } => pages * rows * cols,
        }
    }

    /// Extent of `axis`, or `None` when the axis does not exist.
    #[inline]
    pub fn extent(&self, axis: usize) -> Option<usize> {
        self.dims().get(axis).copied()
    }

    /// Row-major element strides, outermost first.
    pub fn strides(&self) -> Vec<usize> {
        let dims = self.dims();
        let mut strides = vec![1usize; dims.len()];
        for axis in (0..dims.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * dims[axis + 1];
        }
        strides
    }
}

impl Default for ShapeDim {
    fn default() -> Self {
        ShapeDim::Rank0
    }
}

impl fmt::Display for ShapeDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ShapeDim::Rank0 => write!(f, "()"),
            ShapeDim::Rank1(n) => write!(f, "({},)", n),
            ShapeDim::Rank2 { rows, cols } => write!(f, "({}, {})", rows, cols),
            ShapeDim::Rank3 { pages, rows, cols } => write!(f, "({}, {}, {})", pages, rows, cols),
        }
    }
}

/// Implement `Shape` for `ShapeDim` so generic helpers accept a bare shape
/// as readily as a value.
impl Shape for ShapeDim {
    fn shape(&self) -> ShapeDim {
        *self
    }
}
