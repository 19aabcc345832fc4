//! # Error Module - Custom *Rankflow* Error Type
//!
//! Defines the unified error type for every kernel entry point.
//!
//! ## Features
//! - Covers non-broadcastable shapes, contracted-axis extent disagreement,
//! ranks outside the supported ceiling, inconsistent caller options and
//! malformed boolean buffers.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.
//!
//! All variants are raised before a result buffer is allocated, so a failure
//! never leaves a partially computed value behind.

use std::error::Error;
use std::fmt;

/// Catch all error type for `Rankflow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Operand shapes are not broadcast-compatible, contracted axis extents
    /// disagree, or a buffer length does not match its declared shape.
    ShapeMismatch {
        lhs: Vec<usize>,
        rhs: Vec<usize>,
        message: Option<String>,
    },
    /// An operand rank is above the supported ceiling, or is not valid for
    /// the requested operation.
    UnsupportedRank {
        rank: usize,
        operation: &'static str,
    },
    /// A caller-supplied option is internally inconsistent.
    InvalidOptions { message: String },
    /// A boolean buffer holds a byte other than 0 or 1.
    InvalidBoolean { index: usize, value: u8 },
}

impl KernelError {
    /// Shorthand for a `ShapeMismatch` with a message.
    pub(crate) fn shape_mismatch(lhs: &[usize], rhs: &[usize], message: impl Into<String>) -> Self {
        KernelError::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
            message: Some(message.into()),
        }
    }

    pub(crate) fn invalid_options(message: impl Into<String>) -> Self {
        KernelError::InvalidOptions {
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, KernelError::ShapeMismatch { .. })
    }

    #[inline]
    pub fn is_unsupported_rank(&self) -> bool {
        matches!(self, KernelError::UnsupportedRank { .. })
    }

    #[inline]
    pub fn is_invalid_options(&self) -> bool {
        matches!(self, KernelError::InvalidOptions { .. })
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::ShapeMismatch { lhs, rhs, message } => {
                if let Some(msg) = message {
                    write!(f, "Shape mismatch between {:?} and {:?}: {}", lhs, rhs, msg)
                } else {
                    write!(f, "Shape mismatch between {:?} and {:?}.", lhs, rhs)
                }
            }
            KernelError::UnsupportedRank { rank, operation } => {
                write!(f, "Unsupported rank: '{}' does not accept an operand of rank {}.", operation, rank)
            }
            KernelError::InvalidOptions { message } => {
                write!(f, "Invalid options: {}", message)
            }
            KernelError::InvalidBoolean { index, value } => {
                write!(
                    f,
                    "Invalid boolean: element {} holds byte {}, expected 0 or 1.",
                    index, value
                )
            }
        }
    }
}

impl Error for KernelError {}
