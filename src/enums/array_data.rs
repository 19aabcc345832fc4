//! # ArrayData Enum Module
//!
//! Tagged storage of an `ArrayValue`: one buffer, in exactly one element kind.

use std::borrow::Cow;

use crate::enums::element_kind::ElementKind;
use crate::structs::buffer::Buffer;
use crate::traits::type_unions::{Element, truth_byte};

/// Primary storage of an `ArrayValue`.
///
/// Exactly one representation is stored. The other one is synthesised on
/// demand through [`ArrayData::numeric`] / [`ArrayData::boolean`], never
/// cached, so the value stays immutable and freely shareable across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Numeric(Buffer<f64>),
    Boolean(Buffer<u8>),
}

impl ArrayData {
    #[inline]
    pub fn kind(&self) -> ElementKind {
        match self {
            ArrayData::Numeric(_) => ElementKind::Numeric,
            ArrayData::Boolean(_) => ElementKind::Boolean,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Numeric(b) => b.len(),
            ArrayData::Boolean(b) => b.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric view. Borrows when already numeric, otherwise maps 0/1 to 0.0/1.0.
    pub fn numeric(&self) -> Cow<'_, [f64]> {
        match self {
            ArrayData::Numeric(b) => Cow::Borrowed(b.as_slice()),
            ArrayData::Boolean(b) => Cow::Owned(b.iter().map(|&x| x.to_numeric()).collect()),
        }
    }

    /// Boolean view. Borrows when already boolean, otherwise applies the nonzero test.
    pub fn boolean(&self) -> Cow<'_, [u8]> {
        match self {
            ArrayData::Boolean(b) => Cow::Borrowed(b.as_slice()),
            ArrayData::Numeric(b) => Cow::Owned(b.iter().map(|&x| truth_byte(x.to_truth())).collect()),
        }
    }

    /// Element at flat offset `idx` in the numeric domain.
    #[inline]
    pub fn numeric_at(&self, idx: usize) -> Option<f64> {
        match self {
            ArrayData::Numeric(b) => b.get(idx).copied(),
            ArrayData::Boolean(b) => b.get(idx).map(|&x| x.to_numeric()),
        }
    }

    /// Element at flat offset `idx` in the boolean domain.
    #[inline]
    pub fn truth_at(&self, idx: usize) -> Option<bool> {
        match self {
            ArrayData::Numeric(b) => b.get(idx).map(|&x| x.to_truth()),
            ArrayData::Boolean(b) => b.get(idx).map(|&x| x.to_truth()),
        }
    }

    /// Storage converted into `kind`. Shares the buffer when no conversion is needed.
    pub fn to_kind(&self, kind: ElementKind) -> ArrayData {
        match (self, kind) {
            (ArrayData::Numeric(_), ElementKind::Numeric) | (ArrayData::Boolean(_), ElementKind::Boolean) => {
                self.clone()
            }
            (ArrayData::Boolean(b), ElementKind::Numeric) => {
                ArrayData::Numeric(b.iter().map(|&x| x.to_numeric()).collect())
            }
            (ArrayData::Numeric(b), ElementKind::Boolean) => {
                ArrayData::Boolean(b.iter().map(|&x| truth_byte(x.to_truth())).collect())
            }
        }
    }
}
