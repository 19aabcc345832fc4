//! # ArrayValue Module - *The dynamic-rank value every kernel consumes and produces*
//!
//! Dense, row-major, rank 0 to 3 array of one element kind.
//!
//! ## Behaviour
//! - Constructed once, never mutated. Every kernel allocates a new value.
//! - Cloning shares the underlying [`Buffer`], so propagating a value
//!   through an expression tree is O(1).
//! - Both element views are always available: `as_numeric` maps booleans to
//!   0.0/1.0 and `as_boolean` applies the nonzero test. Neither can fail.
//! - Constructors validate that the buffer length equals the shape product
//!   and that boolean bytes are 0 or 1.

use std::borrow::Cow;

use vec64::Vec64;

use crate::enums::array_data::ArrayData;
use crate::enums::element_kind::ElementKind;
use crate::enums::error::KernelError;
use crate::enums::shape_dim::ShapeDim;
use crate::structs::buffer::Buffer;
use crate::traits::shape::Shape;
use crate::traits::type_unions::truth_byte;

/// # ArrayValue
///
/// Dynamic-rank, dynamic-shape container of one scalar element kind.
///
/// ### Properties
/// - `shape`: rank and extents, see [`ShapeDim`].
/// - `data`: primary storage, numeric (`f64`) or boolean (`u8` 0/1).
///
/// ### Example
/// ```rust
/// use rankflow::{ArrayValue, ElementKind, Shape};
///
/// let m = ArrayValue::matrix(2, 2, vec![1.0, 0.0, 0.0, 3.0]).unwrap();
/// assert_eq!(m.rank(), 2);
/// let b = m.as_boolean();
/// assert_eq!(b.element_kind(), ElementKind::Boolean);
/// assert_eq!(&*b.boolean_data(), &[1, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    shape: ShapeDim,
    data: ArrayData,
}

impl ArrayValue {
    // ----------------------------- construction -----------------------------

    /// Numeric scalar.
    #[inline]
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: ShapeDim::Rank0,
            data: ArrayData::Numeric(Buffer::from_slice(&[value])),
        }
    }

    /// Boolean scalar.
    #[inline]
    pub fn scalar_bool(value: bool) -> Self {
        Self {
            shape: ShapeDim::Rank0,
            data: ArrayData::Boolean(Buffer::from_slice(&[truth_byte(value)])),
        }
    }

    /// Numeric vector; the shape follows the data length.
    pub fn vector(data: impl Into<Vec<f64>>) -> Self {
        let data: Vec<f64> = data.into();
        Self {
            shape: ShapeDim::Rank1(data.len()),
            data: ArrayData::Numeric(Buffer::from(data)),
        }
    }

    /// Boolean vector; the shape follows the data length.
    pub fn bool_vector(data: &[bool]) -> Self {
        Self {
            shape: ShapeDim::Rank1(data.len()),
            data: ArrayData::Boolean(data.iter().map(|&b| truth_byte(b)).collect()),
        }
    }

    /// Row-major numeric matrix.
    pub fn matrix(rows: usize, cols: usize, data: impl Into<Vec<f64>>) -> Result<Self, KernelError> {
        let data: Vec<f64> = data.into();
        Self::from_numeric(ShapeDim::Rank2 { rows, cols }, data)
    }

    /// Row-major boolean matrix.
    pub fn bool_matrix(rows: usize, cols: usize, data: &[bool]) -> Result<Self, KernelError> {
        Self::from_bools(ShapeDim::Rank2 { rows, cols }, data)
    }

    /// Row-major numeric 3d tensor, `pages` outermost.
    pub fn tensor(
        pages: usize,
        rows: usize,
        cols: usize,
        data: impl Into<Vec<f64>>,
    ) -> Result<Self, KernelError> {
        let data: Vec<f64> = data.into();
        Self::from_numeric(ShapeDim::Rank3 { pages, rows, cols }, data)
    }

    /// Numeric value of any supported rank from an extent list and a flat buffer.
    pub fn from_dims(dims: &[usize], data: impl Into<Vec<f64>>) -> Result<Self, KernelError> {
        let data: Vec<f64> = data.into();
        Self::from_numeric(ShapeDim::from_dims(dims)?, data)
    }

    /// Numeric value from a shape and a flat row-major buffer.
    pub fn from_numeric(shape: ShapeDim, data: impl Into<Buffer<f64>>) -> Result<Self, KernelError> {
        let data = data.into();
        check_len(&shape, data.len())?;
        Ok(Self {
            shape,
            data: ArrayData::Numeric(data),
        })
    }

    /// Boolean value from a shape and a flat row-major byte buffer.
    ///
    /// Every byte must be 0 or 1.
    pub fn from_boolean(shape: ShapeDim, data: impl Into<Buffer<u8>>) -> Result<Self, KernelError> {
        let data = data.into();
        check_len(&shape, data.len())?;
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(KernelError::InvalidBoolean { index, value });
        }
        Ok(Self {
            shape,
            data: ArrayData::Boolean(data),
        })
    }

    /// Boolean value from a shape and a `bool` slice.
    pub fn from_bools(shape: ShapeDim, data: &[bool]) -> Result<Self, KernelError> {
        check_len(&shape, data.len())?;
        Ok(Self {
            shape,
            data: ArrayData::Boolean(data.iter().map(|&b| truth_byte(b)).collect()),
        })
    }

    /// Numeric value of `shape` filled with zeros.
    pub fn zeros(shape: ShapeDim) -> Self {
        let data: Vec64<f64> = std::iter::repeat_n(0.0, shape.size()).collect();
        Self {
            shape,
            data: ArrayData::Numeric(Buffer::from_vec64(data)),
        }
    }

    /// Copy of `other` that shares its buffer.
    #[inline]
    pub fn from_value(other: &ArrayValue) -> Self {
        other.clone()
    }

    /// Kernel-side constructor for buffers whose length is already known to
    /// match `shape`.
    #[inline]
    pub(crate) fn from_parts(shape: ShapeDim, data: ArrayData) -> Self {
        debug_assert_eq!(shape.size(), data.len(), "kernel produced a buffer of the wrong length");
        Self { shape, data }
    }

    // ------------------------------- accessors ------------------------------

    #[inline]
    pub fn element_kind(&self) -> ElementKind {
        self.data.kind()
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        self.element_kind() == ElementKind::Boolean
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.element_kind() == ElementKind::Numeric
    }

    /// Primary storage.
    #[inline]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Numeric view of the flat row-major storage.
    #[inline]
    pub fn numeric_data(&self) -> Cow<'_, [f64]> {
        self.data.numeric()
    }

    /// Boolean (0/1) view of the flat row-major storage.
    #[inline]
    pub fn boolean_data(&self) -> Cow<'_, [u8]> {
        self.data.boolean()
    }

    /// Same-shape value with numeric primary storage.
    ///
    /// Shares the buffer when already numeric.
    #[inline]
    pub fn as_numeric(&self) -> ArrayValue {
        Self {
            shape: self.shape,
            data: self.data.to_kind(ElementKind::Numeric),
        }
    }

    /// Same-shape value with boolean primary storage.
    ///
    /// Shares the buffer when already boolean.
    #[inline]
    pub fn as_boolean(&self) -> ArrayValue {
        Self {
            shape: self.shape,
            data: self.data.to_kind(ElementKind::Boolean),
        }
    }

    /// Flat row-major offset of a multi-index, or `None` when it is out of bounds
    /// or has the wrong number of components.
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        let dims = self.shape.dims();
        if index.len() != dims.len() {
            return None;
        }
        let mut offset = 0usize;
        for (&i, &d) in index.iter().zip(dims.iter()) {
            if i >= d {
                return None;
            }
            offset = offset * d + i;
        }
        Some(offset)
    }

    /// Element at `index` in the numeric domain.
    #[inline]
    pub fn get_f64(&self, index: &[usize]) -> Option<f64> {
        self.flat_index(index).and_then(|i| self.data.numeric_at(i))
    }

    /// Element at `index` in the boolean domain.
    #[inline]
    pub fn get_bool(&self, index: &[usize]) -> Option<bool> {
        self.flat_index(index).and_then(|i| self.data.truth_at(i))
    }

    /// The single element of a rank-0 value, in the numeric domain.
    #[inline]
    pub fn scalar_value(&self) -> Option<f64> {
        match self.shape {
            ShapeDim::Rank0 => self.data.numeric_at(0),
            _ => None,
        }
    }

    /// Same data under a new shape with the same element count.
    ///
    /// Shares the buffer.
    pub fn reshape(&self, shape: ShapeDim) -> Result<ArrayValue, KernelError> {
        if shape.size() != self.size() {
            return Err(KernelError::shape_mismatch(
                &self.shape.dims(),
                &shape.dims(),
                "reshape must preserve the element count",
            ));
        }
        Ok(Self {
            shape,
            data: self.data.clone(),
        })
    }
}

impl Shape for ArrayValue {
    #[inline]
    fn shape(&self) -> ShapeDim {
        self.shape
    }
}

impl From<f64> for ArrayValue {
    fn from(value: f64) -> Self {
        ArrayValue::scalar(value)
    }
}

impl From<bool> for ArrayValue {
    fn from(value: bool) -> Self {
        ArrayValue::scalar_bool(value)
    }
}

impl From<Vec<f64>> for ArrayValue {
    fn from(data: Vec<f64>) -> Self {
        ArrayValue::vector(data)
    }
}

fn check_len(shape: &ShapeDim, len: usize) -> Result<(), KernelError> {
    if shape.size() != len {
        return Err(KernelError::shape_mismatch(
            &shape.dims(),
            &[len],
            format!("buffer holds {} elements, shape requires {}", len, shape.size()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_construction() {
        let s = ArrayValue::scalar(41.0);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.size(), 1);
        assert!(s.dims().is_empty());
        assert_eq!(s.scalar_value(), Some(41.0));
        assert_eq!(s.get_f64(&[]), Some(41.0));
        assert_eq!(s.get_bool(&[]), Some(true));
    }

    #[test]
    fn test_matrix_length_validation() {
        let err = ArrayValue::matrix(2, 3, vec![1.0; 5]).unwrap_err();
        assert!(err.is_shape_mismatch());
        assert!(ArrayValue::tensor(2, 2, 2, vec![0.0; 8]).is_ok());
    }

    #[test]
    fn test_boolean_bytes_validated() {
        let err = ArrayValue::from_boolean(ShapeDim::Rank1(3), vec![0u8, 2, 1]).unwrap_err();
        assert_eq!(err, KernelError::InvalidBoolean { index: 1, value: 2 });
    }

    #[test]
    fn test_row_major_indexing() {
        let m = ArrayValue::matrix(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(m.get_f64(&[1, 0]), Some(3.0));
        assert_eq!(m.get_f64(&[0, 2]), Some(2.0));
        assert_eq!(m.get_f64(&[2, 0]), None);
        assert_eq!(m.get_f64(&[0]), None);
        let t = ArrayValue::tensor(2, 2, 2, (0..8).map(|x| x as f64).collect::<Vec<_>>()).unwrap();
        assert_eq!(t.get_f64(&[1, 0, 1]), Some(5.0));
    }

    #[test]
    fn test_views_and_coercion_idempotence() {
        let b = ArrayValue::bool_vector(&[true, false, true, true]);
        let n = b.as_numeric();
        assert_eq!(n.element_kind(), ElementKind::Numeric);
        assert_eq!(&*n.numeric_data(), &[1.0, 0.0, 1.0, 1.0]);
        assert_eq!(n.as_boolean(), b);
    }

    #[test]
    fn test_numeric_to_boolean_truthiness() {
        let v = ArrayValue::vector(vec![0.0, -3.5, 0.25, 0.0]);
        assert_eq!(&*v.boolean_data(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_clone_and_view_share_buffer() {
        let v = ArrayValue::vector(vec![1.0, 2.0]);
        let copy = ArrayValue::from_value(&v);
        let same_kind = v.as_numeric();
        match (v.data(), copy.data(), same_kind.data()) {
            (ArrayData::Numeric(a), ArrayData::Numeric(b), ArrayData::Numeric(c)) => {
                assert!(a.ptr_eq(b));
                assert!(a.ptr_eq(c));
            }
            _ => panic!("Expected numeric storage"),
        }
    }

    #[test]
    fn test_reshape() {
        let v = ArrayValue::vector(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let m = v.reshape(ShapeDim::Rank2 { rows: 2, cols: 3 }).unwrap();
        assert_eq!(m.get_f64(&[1, 1]), Some(5.0));
        assert!(v.reshape(ShapeDim::Rank2 { rows: 4, cols: 2 }).unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn test_zeros_and_empty() {
        let z = ArrayValue::zeros(ShapeDim::Rank2 { rows: 2, cols: 2 });
        assert_eq!(&*z.numeric_data(), &[0.0; 4]);
        let e = ArrayValue::vector(Vec::new());
        assert_eq!(e.size(), 0);
        assert_eq!(e.shape(), ShapeDim::Rank1(0));
    }
}
