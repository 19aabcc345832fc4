//! # Binary Map Module
//!
//! Generic binary function application over a resolved [`BroadcastPlan`].

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;
use vec64::Vec64;

use crate::kernels::broadcast::BroadcastPlan;

/// Output length above which `parallel_proc` builds split the loop across
/// the rayon pool.
#[cfg(feature = "parallel_proc")]
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Apply a binary function element-wise with broadcasting.
///
/// `lhs` and `rhs` are the flat row-major operand buffers described by the
/// plan's operand shapes. The function is applied at every output position
/// and the results are written, row-major, into a fresh buffer.
///
/// # Type Parameters
/// - `A`, `B`: operand element types, independent of each other.
/// - `O`: output element type.
///
/// # Example
/// ```ignore
/// let plan = BroadcastPlan::new(ShapeDim::Rank0, ShapeDim::Rank1(3))?;
/// let out = binary_map(&plan, &[10.0], &[1.0, 2.0, 3.0], |a, b| a * b);
/// assert_eq!(&out[..], &[10.0, 20.0, 30.0]);
/// ```
pub fn binary_map<A, B, O, F>(plan: &BroadcastPlan, lhs: &[A], rhs: &[B], f: F) -> Vec64<O>
where
    A: Copy + Sync,
    B: Copy + Sync,
    O: Send,
    F: Fn(A, B) -> O + Sync,
{
    debug_assert_eq!(lhs.len(), plan.lhs_shape().size());
    debug_assert_eq!(rhs.len(), plan.rhs_shape().size());

    #[cfg(feature = "parallel_proc")]
    {
        if plan.len() >= PARALLEL_THRESHOLD {
            let out: Vec<O> = (0..plan.len())
                .into_par_iter()
                .map(|idx| {
                    let (l, r) = plan.source_indices(idx);
                    f(lhs[l], rhs[r])
                })
                .collect();
            return Vec64::from(out);
        }
    }

    let mut out = Vec64::with_capacity(plan.len());
    plan.for_each_pair(|l, r| out.push(f(lhs[l], rhs[r])));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::shape_dim::ShapeDim;

    #[test]
    fn test_binary_map_two_arrays() {
        let plan = BroadcastPlan::new(ShapeDim::Rank1(3), ShapeDim::Rank1(3)).unwrap();
        let out = binary_map(&plan, &[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0], |a: f64, b: f64| a + b);
        assert_eq!(&out[..], &[11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_binary_map_broadcast_scalar() {
        let plan = BroadcastPlan::new(ShapeDim::Rank1(3), ShapeDim::Rank0).unwrap();
        let out = binary_map(&plan, &[1.0, 2.0, 3.0], &[10.0], |a: f64, b: f64| a * b);
        assert_eq!(&out[..], &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_binary_map_mixed_element_types() {
        let plan = BroadcastPlan::new(
            ShapeDim::Rank2 { rows: 2, cols: 2 },
            ShapeDim::Rank1(2),
        )
        .unwrap();
        let out = binary_map(&plan, &[1.0, 0.0, 1.0, 1.0], &[1u8, 0u8], |a: f64, b: u8| {
            (a != b as f64) as u8
        });
        assert_eq!(&out[..], &[0, 0, 0, 1]);
    }
}
