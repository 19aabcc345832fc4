//! # ElementKind Enum Module
//!
//! The two scalar element types an `ArrayValue` can store.

use std::fmt;

/// Stored element type of an `ArrayValue`.
///
/// The kind a value is constructed with is its *primary* representation.
/// The other kind is always reachable through `as_numeric` / `as_boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// Double precision float.
    #[default]
    Numeric,
    /// Single byte, 0 or 1.
    Boolean,
}

impl ElementKind {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Numeric => "numeric",
            ElementKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
