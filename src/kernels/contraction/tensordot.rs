//! # Tensordot
//!
//! General multiply-accumulate over paired axes of two operands. The dot
//! table routes its rank-3 cases here, and `contract_axes` on a contraction
//! call lands here directly.
//!
//! Result axes are the non-contracted axes of `lhs`, in order, followed by
//! the non-contracted axes of `rhs`, in order.

use vec64::Vec64;

use crate::enums::array_data::ArrayData;
use crate::enums::error::KernelError;
use crate::enums::shape_dim::{MAX_RANK, ShapeDim};
use crate::structs::array_value::ArrayValue;
use crate::structs::buffer::Buffer;
use crate::structs::options::ContractAxes;
use crate::traits::shape::Shape;

/// Contract `lhs` against `rhs` over the axes named by `axes`.
///
/// Fails with `InvalidOptions` for axes out of range, repeated axes or axis
/// lists of different lengths, `ShapeMismatch` when a paired extent differs
/// and `UnsupportedRank` when the result would exceed rank 3.
pub fn tensordot(lhs: &ArrayValue, rhs: &ArrayValue, axes: &ContractAxes) -> Result<ArrayValue, KernelError> {
    let (lhs_axes, rhs_axes) = resolve_axes(axes, lhs.rank(), rhs.rank())?;
    contract(lhs, rhs, &lhs_axes, &rhs_axes, "tensordot")
}

/// Resolves a `ContractAxes` into validated, non-negative axis lists.
pub fn resolve_axes(
    axes: &ContractAxes,
    lhs_rank: usize,
    rhs_rank: usize,
) -> Result<(Vec<usize>, Vec<usize>), KernelError> {
    match axes {
        ContractAxes::Trailing(k) => {
            let k = *k;
            if k > lhs_rank || k > rhs_rank {
                return Err(KernelError::invalid_options(format!(
                    "cannot contract {} axes of operands with ranks {} and {}",
                    k, lhs_rank, rhs_rank
                )));
            }
            Ok(((lhs_rank - k..lhs_rank).collect(), (0..k).collect()))
        }
        ContractAxes::Pairs { lhs, rhs } => {
            if lhs.len() != rhs.len() {
                return Err(KernelError::invalid_options(format!(
                    "axis lists differ in length: {} on lhs, {} on rhs",
                    lhs.len(),
                    rhs.len()
                )));
            }
            Ok((normalize_axes(lhs, lhs_rank, "lhs")?, normalize_axes(rhs, rhs_rank, "rhs")?))
        }
    }
}

fn normalize_axes(axes: &[isize], rank: usize, side: &str) -> Result<Vec<usize>, KernelError> {
    let mut out = Vec::with_capacity(axes.len());
    for &axis in axes {
        let resolved = if axis < 0 {
            rank.checked_sub(axis.unsigned_abs())
        } else if (axis as usize) < rank {
            Some(axis as usize)
        } else {
            None
        };
        let Some(resolved) = resolved else {
            return Err(KernelError::invalid_options(format!(
                "{} axis {} is out of range for rank {}",
                side, axis, rank
            )));
        };
        if out.contains(&resolved) {
            return Err(KernelError::invalid_options(format!(
                "{} axis {} is repeated",
                side, resolved
            )));
        }
        out.push(resolved);
    }
    Ok(out)
}

/// Contracts the paired axes `lhs_axes[i]` and `rhs_axes[i]`.
///
/// Axis lists must already be in range and duplicate free.
pub(crate) fn contract(
    lhs: &ArrayValue,
    rhs: &ArrayValue,
    lhs_axes: &[usize],
    rhs_axes: &[usize],
    operation: &'static str,
) -> Result<ArrayValue, KernelError> {
    debug_assert_eq!(lhs_axes.len(), rhs_axes.len());
    let lhs_dims = lhs.dims();
    let rhs_dims = rhs.dims();

    for (&la, &ra) in lhs_axes.iter().zip(rhs_axes) {
        if lhs_dims[la] != rhs_dims[ra] {
            return Err(KernelError::shape_mismatch(
                &lhs_dims,
                &rhs_dims,
                format!(
                    "{}: lhs axis {} has extent {} but rhs axis {} has extent {}",
                    operation, la, lhs_dims[la], ra, rhs_dims[ra]
                ),
            ));
        }
    }

    let lhs_free: Vec<usize> = (0..lhs_dims.len()).filter(|a| !lhs_axes.contains(a)).collect();
    let rhs_free: Vec<usize> = (0..rhs_dims.len()).filter(|a| !rhs_axes.contains(a)).collect();
    let out_rank = lhs_free.len() + rhs_free.len();
    if out_rank > MAX_RANK {
        return Err(KernelError::UnsupportedRank {
            rank: out_rank,
            operation,
        });
    }

    let out_dims: Vec<usize> = lhs_free
        .iter()
        .map(|&a| lhs_dims[a])
        .chain(rhs_free.iter().map(|&a| rhs_dims[a]))
        .collect();
    let out_shape = ShapeDim::from_dims(&out_dims)?;

    let lhs_strides = lhs.shape().strides();
    let rhs_strides = rhs.shape().strides();
    let lhs_rows = offsets(&lhs_dims, &lhs_strides, &lhs_free);
    let lhs_inner = offsets(&lhs_dims, &lhs_strides, lhs_axes);
    let rhs_inner = offsets(&rhs_dims, &rhs_strides, rhs_axes);
    let rhs_cols = offsets(&rhs_dims, &rhs_strides, &rhs_free);

    let a = lhs.numeric_data();
    let b = rhs.numeric_data();
    let mut out = Vec64::with_capacity(out_shape.size());
    for &row in &lhs_rows {
        for &col in &rhs_cols {
            let mut acc = 0.0;
            for (&li, &ri) in lhs_inner.iter().zip(&rhs_inner) {
                acc += a[row + li] * b[ri + col];
            }
            out.push(acc);
        }
    }
    Ok(ArrayValue::from_parts(out_shape, ArrayData::Numeric(Buffer::from_vec64(out))))
}

/// Flat offsets of every row-major multi-index over `axes`, all other axes
/// held at zero. An empty axis list yields the single offset 0.
fn offsets(dims: &[usize], strides: &[usize], axes: &[usize]) -> Vec<usize> {
    let mut out = vec![0usize];
    for &axis in axes {
        let extent = dims[axis];
        let stride = strides[axis];
        let mut next = Vec::with_capacity(out.len() * extent);
        for &base in &out {
            for i in 0..extent {
                next.push(base + i * stride);
            }
        }
        out = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(dims: &[usize]) -> ArrayValue {
        let n: usize = dims.iter().product();
        ArrayValue::from_dims(dims, (0..n).map(|i| i as f64).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_offsets() {
        // dims (2, 3), strides (3, 1)
        assert_eq!(offsets(&[2, 3], &[3, 1], &[1]), vec![0, 1, 2]);
        assert_eq!(offsets(&[2, 3], &[3, 1], &[0]), vec![0, 3]);
        assert_eq!(offsets(&[2, 3], &[3, 1], &[]), vec![0]);
        assert_eq!(offsets(&[2, 3], &[3, 1], &[1, 0]), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_trailing_zero_is_outer() {
        let u = ArrayValue::vector(vec![1.0, 2.0]);
        let v = ArrayValue::vector(vec![3.0, 4.0, 5.0]);
        let r = tensordot(&u, &v, &ContractAxes::Trailing(0)).unwrap();
        assert_eq!(r.dims(), vec![2, 3]);
        assert_eq!(&*r.numeric_data(), &[3.0, 4.0, 5.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_trailing_two_full_contraction() {
        let a = seq(&[2, 3]);
        let r = tensordot(&a, &a, &ContractAxes::Trailing(2)).unwrap();
        assert_eq!(r.shape(), ShapeDim::Rank0);
        // 0 + 1 + 4 + 9 + 16 + 25
        assert_eq!(r.scalar_value(), Some(55.0));
    }

    #[test]
    fn test_tensor_against_matrix_two_axes() {
        // (2, 3, 4) . (3, 4) over the last two lhs axes -> (2,)
        let a = seq(&[2, 3, 4]);
        let b = ArrayValue::from_dims(&[3, 4], vec![1.0; 12]).unwrap();
        let r = tensordot(&a, &b, &ContractAxes::Trailing(2)).unwrap();
        assert_eq!(r.dims(), vec![2]);
        let first: f64 = (0..12).map(|i| i as f64).sum();
        let second: f64 = (12..24).map(|i| i as f64).sum();
        assert_eq!(&*r.numeric_data(), &[first, second]);
    }

    #[test]
    fn test_pairs_with_transposed_axes() {
        // Contract axis 0 of both: a^T . b
        let a = seq(&[2, 3]);
        let b = seq(&[2, 2]);
        let r = tensordot(&a, &b, &ContractAxes::single(0, 0)).unwrap();
        assert_eq!(r.dims(), vec![3, 2]);
        // a = [[0,1,2],[3,4,5]], b = [[0,1],[2,3]]
        assert_eq!(&*r.numeric_data(), &[6.0, 9.0, 8.0, 13.0, 10.0, 17.0]);
    }

    #[test]
    fn test_negative_axes() {
        let a = seq(&[2, 3]);
        let b = seq(&[3, 2]);
        let pos = tensordot(&a, &b, &ContractAxes::single(1, 0)).unwrap();
        let neg = tensordot(&a, &b, &ContractAxes::single(-1, -2)).unwrap();
        assert_eq!(pos, neg);
    }

    #[test]
    fn test_invalid_axes() {
        let a = seq(&[2, 3]);
        assert!(tensordot(&a, &a, &ContractAxes::Trailing(3)).unwrap_err().is_invalid_options());
        assert!(tensordot(&a, &a, &ContractAxes::single(2, 0)).unwrap_err().is_invalid_options());
        assert!(tensordot(&a, &a, &ContractAxes::single(-3, 0)).unwrap_err().is_invalid_options());
        let repeated = ContractAxes::Pairs {
            lhs: vec![0, 0],
            rhs: vec![0, 1],
        };
        assert!(tensordot(&a, &a, &repeated).unwrap_err().is_invalid_options());
        let uneven = ContractAxes::Pairs {
            lhs: vec![0],
            rhs: vec![0, 1],
        };
        assert!(tensordot(&a, &a, &uneven).unwrap_err().is_invalid_options());
    }

    #[test]
    fn test_extent_mismatch() {
        let a = seq(&[2, 3]);
        let err = tensordot(&a, &a, &ContractAxes::Trailing(1)).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_result_rank_ceiling() {
        let a = seq(&[2, 2]);
        let err = tensordot(&a, &a, &ContractAxes::Trailing(0)).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedRank { rank: 4, .. }));
    }
}
