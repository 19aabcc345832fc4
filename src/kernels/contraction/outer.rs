//! # Outer
//!
//! Outer product: every pairwise product of the two operands, nothing
//! contracted. Result axes are the lhs axes followed by the rhs axes.

use vec64::Vec64;

use crate::enums::array_data::ArrayData;
use crate::enums::error::KernelError;
use crate::enums::shape_dim::{MAX_RANK, ShapeDim};
use crate::structs::array_value::ArrayValue;
use crate::structs::buffer::Buffer;
use crate::traits::shape::Shape;

/// Outer product of two values of rank 1 or more.
///
/// A rank-0 operand, or a result above rank 3, fails with `UnsupportedRank`.
pub fn outer(lhs: &ArrayValue, rhs: &ArrayValue) -> Result<ArrayValue, KernelError> {
    for rank in [lhs.rank(), rhs.rank()] {
        if rank == 0 {
            return Err(KernelError::UnsupportedRank {
                rank,
                operation: "outer",
            });
        }
    }
    let out_rank = lhs.rank() + rhs.rank();
    if out_rank > MAX_RANK {
        return Err(KernelError::UnsupportedRank {
            rank: out_rank,
            operation: "outer",
        });
    }

    let mut dims = lhs.dims();
    dims.extend(rhs.dims());
    let shape = ShapeDim::from_dims(&dims)?;

    let a = lhs.numeric_data();
    let b = rhs.numeric_data();
    let mut out = Vec64::with_capacity(a.len() * b.len());
    for &x in a.iter() {
        for &y in b.iter() {
            out.push(x * y);
        }
    }
    Ok(ArrayValue::from_parts(shape, ArrayData::Numeric(Buffer::from_vec64(out))))
}
