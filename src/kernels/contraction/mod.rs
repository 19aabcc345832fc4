//! # Contraction Engine
//!
//! Dot products, outer products and tensordot between two `ArrayValue`s of
//! rank 0 to 3.
//!
//! [`evaluate_contraction`] is the host-facing entry point. It picks one of
//! the three kernels from the call options:
//!
//! | mode | contract_axes | kernel |
//! |------|---------------|--------|
//! | `Dot` | `None` | [`dot`], dispatched on operand ranks |
//! | `Dot` | `Some(axes)` | [`tensordot`] over `axes` |
//! | `Outer` | `None` | [`outer`] |
//! | `Outer` | `Some(_)` | `InvalidOptions` |
//!
//! Boolean operands are read as 0.0/1.0. Results are always numeric.

pub mod dot;
pub mod outer;
pub mod tensordot;

use tracing::debug;

pub use dot::dot;
pub use outer::outer;
pub use tensordot::tensordot;

use crate::enums::error::KernelError;
use crate::structs::array_value::ArrayValue;
use crate::structs::options::{ContractionMode, ContractionOptions};
use crate::traits::shape::Shape;

/// Evaluate a contraction of `lhs` with `rhs`.
pub fn evaluate_contraction(
    lhs: &ArrayValue,
    rhs: &ArrayValue,
    options: &ContractionOptions,
) -> Result<ArrayValue, KernelError> {
    debug!(
        mode = ?options.mode,
        axes = ?options.contract_axes,
        lhs = %lhs.shape(),
        rhs = %rhs.shape(),
        "contraction"
    );

    let result = match (options.mode, &options.contract_axes) {
        (ContractionMode::Dot, None) => dot(lhs, rhs),
        (ContractionMode::Dot, Some(axes)) => tensordot(lhs, rhs, axes),
        (ContractionMode::Outer, None) => outer(lhs, rhs),
        (ContractionMode::Outer, Some(_)) => Err(KernelError::invalid_options(
            "an outer product contracts no axes; contract_axes must be unset",
        )),
    };

    if let Err(e) = &result {
        debug!(error = %e, "contraction rejected");
    }
    result
}
