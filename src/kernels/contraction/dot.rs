//! # Dot
//!
//! Rank-driven dot product. Every `(lhs rank, rhs rank)` pair is an arm of
//! one exhaustive match over [`ShapeDim`]:
//!
//! | lhs | rhs | result |
//! |-----|-----|--------|
//! | 0 | n | rhs scaled, rank n |
//! | n | 0 | lhs scaled, rank n |
//! | 1 | 1 | inner product, rank 0 |
//! | 1 | 2 | vector-matrix product, rank 1 |
//! | 2 | 1 | matrix-vector product, rank 1 |
//! | 2 | 2 | matrix product, rank 2 |
//! | 1, 2, 3 | 3 | lhs last axis against rhs middle axis |
//! | 3 | 1, 2 | lhs last axis against rhs first axis |
//!
//! Products whose result would be rank 4 or more are rejected.

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;
use vec64::Vec64;

use crate::enums::array_data::ArrayData;
use crate::enums::error::KernelError;
use crate::enums::shape_dim::ShapeDim;
use crate::kernels::contraction::tensordot::contract;
use crate::structs::array_value::ArrayValue;
use crate::structs::buffer::Buffer;
use crate::traits::shape::Shape;

/// Multiply-accumulate count above which `parallel_proc` builds split a
/// matrix product by output row.
#[cfg(feature = "parallel_proc")]
pub const PARALLEL_MATMUL_THRESHOLD: usize = 1 << 15;

/// Dot product of two values of rank 0 to 3.
///
/// Boolean operands are read as 0.0/1.0 and the result is always numeric.
pub fn dot(lhs: &ArrayValue, rhs: &ArrayValue) -> Result<ArrayValue, KernelError> {
    let a = lhs.numeric_data();
    let b = rhs.numeric_data();

    let (shape, data) = match (lhs.shape(), rhs.shape()) {
        (ShapeDim::Rank0, shape) => (shape, scale(&b, a[0])),
        (shape, ShapeDim::Rank0) => (shape, scale(&a, b[0])),
        (ShapeDim::Rank1(n), ShapeDim::Rank1(m)) => {
            check_inner(lhs, rhs, n, m)?;
            (ShapeDim::Rank0, Vec64::from(&[inner(&a, &b)][..]))
        }
        (ShapeDim::Rank1(n), ShapeDim::Rank2 { rows, cols }) => {
            check_inner(lhs, rhs, n, rows)?;
            (ShapeDim::Rank1(cols), matmul(&a, &b, 1, n, cols))
        }
        (ShapeDim::Rank2 { rows, cols }, ShapeDim::Rank1(n)) => {
            check_inner(lhs, rhs, cols, n)?;
            (ShapeDim::Rank1(rows), matmul(&a, &b, rows, cols, 1))
        }
        (ShapeDim::Rank2 { rows, cols: k }, ShapeDim::Rank2 { rows: k2, cols }) => {
            check_inner(lhs, rhs, k, k2)?;
            (ShapeDim::Rank2 { rows, cols }, matmul(&a, &b, rows, k, cols))
        }
        (ShapeDim::Rank3 { .. }, ShapeDim::Rank3 { .. }) => {
            return Err(KernelError::UnsupportedRank {
                rank: 4,
                operation: "dot",
            });
        }
        (l, ShapeDim::Rank3 { .. }) => return contract(lhs, rhs, &[l.rank() - 1], &[1], "dot"),
        (ShapeDim::Rank3 { .. }, _) => return contract(lhs, rhs, &[2], &[0], "dot"),
    };

    Ok(ArrayValue::from_parts(shape, ArrayData::Numeric(Buffer::from_vec64(data))))
}

/// Inner-axis agreement for the rank 1 and 2 fast paths.
#[inline]
fn check_inner(lhs: &ArrayValue, rhs: &ArrayValue, lhs_extent: usize, rhs_extent: usize) -> Result<(), KernelError> {
    if lhs_extent != rhs_extent {
        return Err(KernelError::shape_mismatch(
            &lhs.dims(),
            &rhs.dims(),
            format!(
                "dot: inner extents differ ({} against {})",
                lhs_extent, rhs_extent
            ),
        ));
    }
    Ok(())
}

#[inline]
fn scale(data: &[f64], factor: f64) -> Vec64<f64> {
    data.iter().map(|&x| x * factor).collect()
}

#[inline]
fn inner(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

/// Row-major `(m x k) . (k x n)`.
fn matmul(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec64<f64> {
    #[cfg(feature = "parallel_proc")]
    {
        if m > 1 && m * k * n >= PARALLEL_MATMUL_THRESHOLD {
            let out: Vec<f64> = (0..m)
                .into_par_iter()
                .flat_map_iter(|i| matmul_row(a, b, i, k, n))
                .collect();
            return Vec64::from(out);
        }
    }

    let mut out = Vec64::with_capacity(m * n);
    for i in 0..m {
        for v in matmul_row(a, b, i, k, n) {
            out.push(v);
        }
    }
    out
}

/// Output row `i` of a matrix product, accumulated in i-k-j order.
#[inline]
fn matmul_row(a: &[f64], b: &[f64], i: usize, k: usize, n: usize) -> Vec<f64> {
    let mut row = vec![0.0; n];
    let a_row = &a[i * k..(i + 1) * k];
    for (p, &aik) in a_row.iter().enumerate() {
        let b_row = &b[p * n..(p + 1) * n];
        for (acc, &bkj) in row.iter_mut().zip(b_row) {
            *acc += aik * bkj;
        }
    }
    row
}
