//! # Options Module
//!
//! Per-call options for the two host entry points.

use std::ops::Range;

/// Options for [`crate::evaluate_binary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryOptions {
    /// Output representation for truth-valued operators.
    ///
    /// - `Some(true)`: boolean primary storage.
    /// - `Some(false)`: numeric primary storage holding 0.0/1.0.
    /// - `None`: boolean only when both operands are boolean, numeric otherwise.
    pub force_boolean_output: Option<bool>,
}

impl BinaryOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_boolean_output(mut self, force: bool) -> Self {
        self.force_boolean_output = Some(force);
        self
    }
}

/// Which contraction family a call evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContractionMode {
    /// Rank-driven dot product, or tensordot when axes are supplied.
    #[default]
    Dot,
    /// Outer product; no axes are contracted.
    Outer,
}

/// Axes to contract in a tensordot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractAxes {
    /// The last `k` axes of lhs against the first `k` axes of rhs, in order.
    Trailing(usize),
    /// Explicit axis lists, paired positionally. Negative indices count
    /// from the last axis.
    Pairs { lhs: Vec<isize>, rhs: Vec<isize> },
}

impl ContractAxes {
    /// One axis on each side.
    #[inline]
    pub fn single(lhs: isize, rhs: isize) -> Self {
        ContractAxes::Pairs {
            lhs: vec![lhs],
            rhs: vec![rhs],
        }
    }

    /// Contiguous axis ranges on each side, paired positionally.
    pub fn ranges(lhs: Range<usize>, rhs: Range<usize>) -> Self {
        ContractAxes::Pairs {
            lhs: lhs.map(|a| a as isize).collect(),
            rhs: rhs.map(|a| a as isize).collect(),
        }
    }
}

/// Options for [`crate::evaluate_contraction`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractionOptions {
    pub mode: ContractionMode,
    /// When set, the call is a tensordot over these axes instead of the
    /// rank-driven dot table. Not valid together with `ContractionMode::Outer`.
    pub contract_axes: Option<ContractAxes>,
}

impl ContractionOptions {
    /// Rank-driven dot product.
    #[inline]
    pub fn dot() -> Self {
        Self::default()
    }

    #[inline]
    pub fn outer() -> Self {
        Self {
            mode: ContractionMode::Outer,
            contract_axes: None,
        }
    }

    #[inline]
    pub fn tensordot(axes: ContractAxes) -> Self {
        Self {
            mode: ContractionMode::Dot,
            contract_axes: Some(axes),
        }
    }
}
