//! # Broadcasting Rules Module
//!
//! Shape compatibility and index mapping shared by every elementwise
//! operator.
//!
//! Shapes are right-aligned and compared from the trailing axis. Two extents
//! are compatible when equal, when either is 1 (the size-1 axis is virtually
//! repeated), or when the shorter shape lacks the axis altogether (treated
//! as 1). The output extent of each axis is the larger of the two.
//!
//! Common cases get their own [`BroadcastRoute`] so kernels can walk the
//! buffers without per-element index arithmetic:
//! - identical shapes are zipped,
//! - a rank-0 operand is combined against every element of the other,
//! - an operand whose shape equals the trailing axes of the other is tiled
//!   (a vector across every matrix row, a matrix across every tensor page).
//!
//! Anything else goes through a strided walk over the padded 3-axis space.

use crate::enums::error::KernelError;
use crate::enums::shape_dim::{MAX_RANK, ShapeDim};

/// How a [`BroadcastPlan`] maps output positions back to operand positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastRoute {
    /// Both operands have the output shape.
    Identical,
    /// lhs holds a single element.
    ScalarLhs,
    /// rhs holds a single element.
    ScalarRhs,
    /// lhs matches the trailing axes of the output and repeats every
    /// `lhs.size()` elements.
    TileLhs,
    /// rhs matches the trailing axes of the output and repeats every
    /// `rhs.size()` elements.
    TileRhs,
    /// General case, per-axis strides with zero on broadcast axes.
    Strided,
}

/// Resolved broadcast of two operand shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastPlan {
    lhs: ShapeDim,
    rhs: ShapeDim,
    out: ShapeDim,
    route: BroadcastRoute,
    /// Output extents left-padded to 3 axes with 1.
    out_dims: [usize; MAX_RANK],
    /// Operand strides over the padded output axes, zero where broadcast.
    lhs_strides: [usize; MAX_RANK],
    rhs_strides: [usize; MAX_RANK],
}

/// Output shape of broadcasting `lhs` against `rhs`.
///
/// Fails with `ShapeMismatch` when any aligned pair of extents differs and
/// neither is 1.
pub fn broadcast_shapes(lhs: ShapeDim, rhs: ShapeDim) -> Result<ShapeDim, KernelError> {
    let l = padded(&lhs);
    let r = padded(&rhs);
    let mut out = [1usize; MAX_RANK];
    for axis in 0..MAX_RANK {
        out[axis] = match (l[axis], r[axis]) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            (a, b) => {
                return Err(KernelError::shape_mismatch(
                    &lhs.dims(),
                    &rhs.dims(),
                    format!(
                        "extents {} and {} on aligned axis {} cannot be broadcast",
                        a,
                        b,
                        axis as isize - MAX_RANK as isize
                    ),
                ));
            }
        };
    }
    let rank = lhs.rank().max(rhs.rank());
    ShapeDim::from_dims(&out[MAX_RANK - rank..])
}

/// Extents left-padded with 1 to `MAX_RANK` axes.
#[inline]
fn padded(shape: &ShapeDim) -> [usize; MAX_RANK] {
    let dims = shape.dims();
    let mut out = [1usize; MAX_RANK];
    out[MAX_RANK - dims.len()..].copy_from_slice(&dims);
    out
}

/// Strides of `operand` over the padded output axes.
fn broadcast_strides(operand: &ShapeDim, out_dims: &[usize; MAX_RANK]) -> [usize; MAX_RANK] {
    let dims = padded(operand);
    let mut strides = [0usize; MAX_RANK];
    let mut step = 1usize;
    for axis in (0..MAX_RANK).rev() {
        strides[axis] = if dims[axis] == 1 && out_dims[axis] != 1 { 0 } else { step };
        step *= dims[axis];
    }
    strides
}

/// True when `small` equals the trailing axes of `big` and is strictly lower rank.
#[inline]
fn is_trailing(small: &ShapeDim, big: &ShapeDim) -> bool {
    let s = small.dims();
    let b = big.dims();
    s.len() < b.len() && b[b.len() - s.len()..] == s[..]
}

impl BroadcastPlan {
    /// Resolves the output shape and the cheapest route for `lhs` against `rhs`.
    pub fn new(lhs: ShapeDim, rhs: ShapeDim) -> Result<Self, KernelError> {
        let out = broadcast_shapes(lhs, rhs)?;
        let out_dims = padded(&out);
        let route = if lhs == rhs {
            BroadcastRoute::Identical
        } else if lhs == ShapeDim::Rank0 {
            BroadcastRoute::ScalarLhs
        } else if rhs == ShapeDim::Rank0 {
            BroadcastRoute::ScalarRhs
        } else if is_trailing(&lhs, &rhs) && out == rhs {
            BroadcastRoute::TileLhs
        } else if is_trailing(&rhs, &lhs) && out == lhs {
            BroadcastRoute::TileRhs
        } else {
            BroadcastRoute::Strided
        };
        Ok(Self {
            lhs,
            rhs,
            out,
            route,
            out_dims,
            lhs_strides: broadcast_strides(&lhs, &out_dims),
            rhs_strides: broadcast_strides(&rhs, &out_dims),
        })
    }

    #[inline]
    pub fn out_shape(&self) -> ShapeDim {
        self.out
    }

    #[inline]
    pub fn route(&self) -> BroadcastRoute {
        self.route
    }

    #[inline]
    pub fn lhs_shape(&self) -> ShapeDim {
        self.lhs
    }

    #[inline]
    pub fn rhs_shape(&self) -> ShapeDim {
        self.rhs
    }

    /// Number of output elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat operand offsets feeding output position `idx`.
    #[inline]
    pub fn source_indices(&self, idx: usize) -> (usize, usize) {
        match self.route {
            BroadcastRoute::Identical => (idx, idx),
            BroadcastRoute::ScalarLhs => (0, idx),
            BroadcastRoute::ScalarRhs => (idx, 0),
            BroadcastRoute::TileLhs => (idx % self.lhs.size(), idx),
            BroadcastRoute::TileRhs => (idx, idx % self.rhs.size()),
            BroadcastRoute::Strided => {
                let [_, d1, d2] = self.out_dims;
                let k = idx % d2;
                let j = (idx / d2) % d1;
                let i = idx / (d1 * d2);
                (
                    i * self.lhs_strides[0] + j * self.lhs_strides[1] + k * self.lhs_strides[2],
                    i * self.rhs_strides[0] + j * self.rhs_strides[1] + k * self.rhs_strides[2],
                )
            }
        }
    }

    /// Calls `f(lhs_offset, rhs_offset)` for every output position, in
    /// row-major output order.
    pub fn for_each_pair(&self, mut f: impl FnMut(usize, usize)) {
        let n = self.len();
        match self.route {
            BroadcastRoute::Identical => (0..n).for_each(|i| f(i, i)),
            BroadcastRoute::ScalarLhs => (0..n).for_each(|i| f(0, i)),
            BroadcastRoute::ScalarRhs => (0..n).for_each(|i| f(i, 0)),
            BroadcastRoute::TileLhs => {
                let period = self.lhs.size();
                for base in (0..n).step_by(period.max(1)) {
                    (0..period).for_each(|k| f(k, base + k));
                }
            }
            BroadcastRoute::TileRhs => {
                let period = self.rhs.size();
                for base in (0..n).step_by(period.max(1)) {
                    (0..period).for_each(|k| f(base + k, k));
                }
            }
            BroadcastRoute::Strided => {
                let [d0, d1, d2] = self.out_dims;
                let [l0, l1, l2] = self.lhs_strides;
                let [r0, r1, r2] = self.rhs_strides;
                for i in 0..d0 {
                    for j in 0..d1 {
                        let (lb, rb) = (i * l0 + j * l1, i * r0 + j * r1);
                        for k in 0..d2 {
                            f(lb + k * l2, rb + k * r2);
                        }
                    }
                }
            }
        }
    }
}
