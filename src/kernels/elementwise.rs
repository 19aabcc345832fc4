//! # Elementwise Binary Engine
//!
//! Applies one [`BinaryOperator`] pairwise across two broadcast-aligned
//! `ArrayValue`s of any rank from 0 to 3, and decides the result's primary
//! representation.
//!
//! ## Output representation
//! For truth-valued operators (comparison and logical families):
//! 1. `force_boolean_output == Some(true)` stores booleans.
//! 2. `force_boolean_output == Some(false)` stores 0.0/1.0 doubles.
//! 3. Unset stores booleans only when both operands are boolean, and
//!    doubles otherwise, including the mixed numeric/boolean case.
//!
//! Arithmetic operators always store doubles. Asking them for boolean
//! output is an `InvalidOptions` error.
//!
//! ## Evaluation domain
//! When both operands are boolean the operator runs on `bool`s. Otherwise
//! boolean operands are read as 0.0/1.0 and the operator runs on `f64`s.
//! The domain never depends on the output representation, so both views of
//! a result always agree.

use tracing::debug;

use crate::enums::array_data::ArrayData;
use crate::enums::element_kind::ElementKind;
use crate::enums::error::KernelError;
use crate::enums::operators::BinaryOperator;
use crate::kernels::broadcast::BroadcastPlan;
use crate::kernels::routing::binary_map::binary_map;
use crate::structs::array_value::ArrayValue;
use crate::structs::buffer::Buffer;
use crate::structs::options::BinaryOptions;
use crate::traits::shape::Shape;
use crate::traits::type_unions::{Element, truth_byte, truth_numeric};

/// Evaluate `op(lhs, rhs)` elementwise with broadcasting.
///
/// Fails with `ShapeMismatch` when the shapes cannot be broadcast and with
/// `InvalidOptions` when boolean output is forced on an arithmetic operator.
/// Both checks run before the result buffer is allocated.
pub fn evaluate_binary(
    op: BinaryOperator,
    lhs: &ArrayValue,
    rhs: &ArrayValue,
    options: &BinaryOptions,
) -> Result<ArrayValue, KernelError> {
    let resolved = resolve_output_kind(
        op,
        lhs.element_kind(),
        rhs.element_kind(),
        options.force_boolean_output,
    )
    .and_then(|kind| BroadcastPlan::new(lhs.shape(), rhs.shape()).map(|plan| (kind, plan)));

    let (kind, plan) = match resolved {
        Ok(ok) => ok,
        Err(e) => {
            debug!(op = %op, lhs = %lhs.shape(), rhs = %rhs.shape(), error = %e, "elementwise rejected");
            return Err(e);
        }
    };

    debug!(
        op = %op,
        lhs = %lhs.shape(),
        rhs = %rhs.shape(),
        out = %plan.out_shape(),
        route = ?plan.route(),
        kind = %kind,
        "elementwise"
    );

    let data = match (lhs.data(), rhs.data()) {
        (ArrayData::Boolean(l), ArrayData::Boolean(r)) => map_boolean_domain(&plan, op, l, r, kind),
        (ArrayData::Numeric(l), ArrayData::Numeric(r)) => map_numeric_domain(&plan, op, l.as_slice(), r.as_slice(), kind),
        (ArrayData::Numeric(l), ArrayData::Boolean(r)) => map_numeric_domain(&plan, op, l.as_slice(), r.as_slice(), kind),
        (ArrayData::Boolean(l), ArrayData::Numeric(r)) => map_numeric_domain(&plan, op, l.as_slice(), r.as_slice(), kind),
    };

    Ok(ArrayValue::from_parts(plan.out_shape(), data))
}

/// Primary representation of `op(lhs, rhs)` under the given override.
pub fn resolve_output_kind(
    op: BinaryOperator,
    lhs: ElementKind,
    rhs: ElementKind,
    force_boolean_output: Option<bool>,
) -> Result<ElementKind, KernelError> {
    if !op.is_truth_valued() {
        return match force_boolean_output {
            Some(true) => Err(KernelError::invalid_options(format!(
                "'{}' produces numeric values and cannot force boolean output",
                op
            ))),
            _ => Ok(ElementKind::Numeric),
        };
    }
    Ok(match force_boolean_output {
        Some(true) => ElementKind::Boolean,
        Some(false) => ElementKind::Numeric,
        None if lhs == ElementKind::Boolean && rhs == ElementKind::Boolean => ElementKind::Boolean,
        None => ElementKind::Numeric,
    })
}

/// Both operands boolean: the operator runs on `bool`s.
fn map_boolean_domain(
    plan: &BroadcastPlan,
    op: BinaryOperator,
    lhs: &Buffer<u8>,
    rhs: &Buffer<u8>,
    kind: ElementKind,
) -> ArrayData {
    let (lhs, rhs) = (lhs.as_slice(), rhs.as_slice());
    match kind {
        ElementKind::Boolean => ArrayData::Boolean(Buffer::from_vec64(binary_map(
            plan,
            lhs,
            rhs,
            |a: u8, b: u8| truth_byte(op.test_bool(a.to_truth(), b.to_truth())),
        ))),
        ElementKind::Numeric if op.is_truth_valued() => ArrayData::Numeric(Buffer::from_vec64(binary_map(
            plan,
            lhs,
            rhs,
            |a: u8, b: u8| truth_numeric(op.test_bool(a.to_truth(), b.to_truth())),
        ))),
        ElementKind::Numeric => ArrayData::Numeric(Buffer::from_vec64(binary_map(
            plan,
            lhs,
            rhs,
            |a: u8, b: u8| op.apply_f64(a.to_numeric(), b.to_numeric()),
        ))),
    }
}

/// At least one numeric operand: the operator runs on `f64`s.
fn map_numeric_domain<A: Element, B: Element>(
    plan: &BroadcastPlan,
    op: BinaryOperator,
    lhs: &[A],
    rhs: &[B],
    kind: ElementKind,
) -> ArrayData {
    match kind {
        ElementKind::Boolean => ArrayData::Boolean(Buffer::from_vec64(binary_map(
            plan,
            lhs,
            rhs,
            |a: A, b: B| truth_byte(op.test_f64(a.to_numeric(), b.to_numeric())),
        ))),
        ElementKind::Numeric => ArrayData::Numeric(Buffer::from_vec64(binary_map(
            plan,
            lhs,
            rhs,
            |a: A, b: B| op.apply_f64(a.to_numeric(), b.to_numeric()),
        ))),
    }
}

/// `lhs == rhs` elementwise.
pub fn equal(lhs: &ArrayValue, rhs: &ArrayValue, force_boolean_output: Option<bool>) -> Result<ArrayValue, KernelError> {
    evaluate_binary(BinaryOperator::Equal, lhs, rhs, &BinaryOptions { force_boolean_output })
}

/// `lhs != rhs` elementwise.
pub fn not_equal(lhs: &ArrayValue, rhs: &ArrayValue, force_boolean_output: Option<bool>) -> Result<ArrayValue, KernelError> {
    evaluate_binary(BinaryOperator::NotEqual, lhs, rhs, &BinaryOptions { force_boolean_output })
}

/// `lhs < rhs` elementwise.
pub fn less(lhs: &ArrayValue, rhs: &ArrayValue, force_boolean_output: Option<bool>) -> Result<ArrayValue, KernelError> {
    evaluate_binary(BinaryOperator::Less, lhs, rhs, &BinaryOptions { force_boolean_output })
}

/// `lhs <= rhs` elementwise.
pub fn less_equal(lhs: &ArrayValue, rhs: &ArrayValue, force_boolean_output: Option<bool>) -> Result<ArrayValue, KernelError> {
    evaluate_binary(BinaryOperator::LessEqual, lhs, rhs, &BinaryOptions { force_boolean_output })
}

/// `lhs > rhs` elementwise.
pub fn greater(lhs: &ArrayValue, rhs: &ArrayValue, force_boolean_output: Option<bool>) -> Result<ArrayValue, KernelError> {
    evaluate_binary(BinaryOperator::Greater, lhs, rhs, &BinaryOptions { force_boolean_output })
}

/// `lhs >= rhs` elementwise.
pub fn greater_equal(lhs: &ArrayValue, rhs: &ArrayValue, force_boolean_output: Option<bool>) -> Result<ArrayValue, KernelError> {
    evaluate_binary(BinaryOperator::GreaterEqual, lhs, rhs, &BinaryOptions { force_boolean_output })
}
