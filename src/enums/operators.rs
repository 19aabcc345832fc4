//! # Operators Module
//!
//! Stable identifiers for every elementwise binary operation the kernel
//! evaluates. Hosts pass a `BinaryOperator` (or parse one from its name) as
//! the `op_id` of [`crate::evaluate_binary`].

use std::fmt;
use std::str::FromStr;

use crate::enums::error::KernelError;

/// Result family of an operator. Decides how the output representation is
/// chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    /// Truth-valued relations between two elements.
    Comparison,
    /// Truth-valued connectives over the truthiness of two elements.
    Logical,
    /// Numeric-valued arithmetic.
    Arithmetic,
}

/// Elementwise binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Xor,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
    Maximum,
    Minimum,
}

impl BinaryOperator {
    /// Every operator, in declaration order.
    pub const ALL: [BinaryOperator; 17] = [
        BinaryOperator::Equal,
        BinaryOperator::NotEqual,
        BinaryOperator::Less,
        BinaryOperator::LessEqual,
        BinaryOperator::Greater,
        BinaryOperator::GreaterEqual,
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::Xor,
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Remainder,
        BinaryOperator::Power,
        BinaryOperator::Maximum,
        BinaryOperator::Minimum,
    ];

    #[inline]
    pub fn family(&self) -> OperatorFamily {
        use BinaryOperator::*;
        match self {
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => OperatorFamily::Comparison,
            And | Or | Xor => OperatorFamily::Logical,
            Add | Subtract | Multiply | Divide | Remainder | Power | Maximum | Minimum => {
                OperatorFamily::Arithmetic
            }
        }
    }

    /// True for operators whose result is a truth value.
    #[inline]
    pub fn is_truth_valued(&self) -> bool {
        !matches!(self.family(), OperatorFamily::Arithmetic)
    }

    /// True when `op(a, b) == op(b, a)` for every pair of elements.
    #[inline]
    pub fn is_commutative(&self) -> bool {
        use BinaryOperator::*;
        matches!(self, Equal | NotEqual | And | Or | Xor | Add | Multiply | Maximum | Minimum)
    }

    /// Canonical name, as accepted by `from_name`.
    pub fn name(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Equal => "equal",
            NotEqual => "not_equal",
            Less => "less",
            LessEqual => "less_equal",
            Greater => "greater",
            GreaterEqual => "greater_equal",
            And => "logical_and",
            Or => "logical_or",
            Xor => "logical_xor",
            Add => "add",
            Subtract => "subtract",
            Multiply => "multiply",
            Divide => "divide",
            Remainder => "remainder",
            Power => "power",
            Maximum => "maximum",
            Minimum => "minimum",
        }
    }

    /// Parses an operator from its canonical name, its primitive name
    /// (`__ne`) or its symbol (`!=`).
    pub fn from_name(name: &str) -> Result<Self, KernelError> {
        use BinaryOperator::*;
        let op = match name {
            "equal" | "__eq" | "==" => Equal,
            "not_equal" | "__ne" | "!=" => NotEqual,
            "less" | "__lt" | "<" => Less,
            "less_equal" | "__le" | "<=" => LessEqual,
            "greater" | "__gt" | ">" => Greater,
            "greater_equal" | "__ge" | ">=" => GreaterEqual,
            "logical_and" | "__and" | "&&" => And,
            "logical_or" | "__or" | "||" => Or,
            "logical_xor" | "__xor" | "^" => Xor,
            "add" | "__add" | "+" => Add,
            "subtract" | "__sub" | "-" => Subtract,
            "multiply" | "__mul" | "*" => Multiply,
            "divide" | "__div" | "/" => Divide,
            "remainder" | "__mod" | "%" => Remainder,
            "power" | "__pow" | "**" => Power,
            "maximum" | "__max" => Maximum,
            "minimum" | "__min" => Minimum,
            other => {
                return Err(KernelError::invalid_options(format!(
                    "unknown elementwise operator '{}'",
                    other
                )));
            }
        };
        Ok(op)
    }

    /// Applies a truth-valued operator in the numeric domain.
    ///
    /// Only meaningful for comparison and logical operators.
    #[inline(always)]
    pub(crate) fn test_f64(self, a: f64, b: f64) -> bool {
        use BinaryOperator::*;
        match self {
            Equal => a == b,
            NotEqual => a != b,
            Less => a < b,
            LessEqual => a <= b,
            Greater => a > b,
            GreaterEqual => a >= b,
            And => a != 0.0 && b != 0.0,
            Or => a != 0.0 || b != 0.0,
            Xor => (a != 0.0) != (b != 0.0),
            // Arithmetic operators are not truth-valued; their truthiness is
            // that of the computed value.
            _ => self.apply_f64(a, b) != 0.0,
        }
    }

    /// Applies a truth-valued operator in the boolean domain.
    #[inline(always)]
    pub(crate) fn test_bool(self, a: bool, b: bool) -> bool {
        use BinaryOperator::*;
        match self {
            Equal => a == b,
            NotEqual => a != b,
            Less => !a & b,
            LessEqual => a <= b,
            Greater => a & !b,
            GreaterEqual => a >= b,
            And => a && b,
            Or => a || b,
            Xor => a ^ b,
            _ => self.apply_f64(a as u8 as f64, b as u8 as f64) != 0.0,
        }
    }

    /// Applies the operator in the numeric domain, truth values as 0.0/1.0.
    #[inline(always)]
    pub(crate) fn apply_f64(self, a: f64, b: f64) -> f64 {
        use BinaryOperator::*;
        match self {
            Add => a + b,
            Subtract => a - b,
            Multiply => a * b,
            Divide => a / b,
            // Floored, sign follows the divisor.
            Remainder => {
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
            }
            Power => a.powf(b),
            Maximum => a.max(b),
            Minimum => a.min(b),
            _ => {
                if self.test_f64(a, b) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinaryOperator {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryOperator::from_name(s)
    }
}
