//! # **Print Module** - *Pretty Printing for Array Values*
//!
//! Contains the `Display` implementation for `ArrayValue`
//! and an additional `Print` trait which wraps it to provide
//! `myvalue.print()` for any object that implements it.
use std::fmt::{self, Display, Formatter};

use crate::enums::array_data::ArrayData;
use crate::structs::array_value::ArrayValue;
use crate::traits::shape::Shape;

/// Axes longer than this are shown as a head and a tail around an ellipsis.
pub(crate) const MAX_PREVIEW: usize = 10;
/// Elements kept at each end of a truncated axis.
pub(crate) const PREVIEW_EDGE: usize = 3;

/// # Print
///
/// Provides a more convenient way to activate `Display`
/// for other types such as array values via `myvalue.print()`,
/// avoiding the need to write `println!("{}", myvalue);`
pub trait Print {
    #[inline]
    fn print(&self)
    where
        Self: Display,
    {
        println!("{}", self);
    }
}

impl<T: Display> Print for T where T: Display {}

impl Display for ArrayValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "ArrayValue [{}] {}", self.element_kind(), self.shape())?;
        let dims = self.dims();
        let strides = self.shape().strides();
        write_axis(f, self.data(), &dims, &strides, 0, 0)
    }
}

/// Writes the sub-array starting at `offset` whose leading axis is `axis`.
fn write_axis(
    f: &mut Formatter<'_>,
    data: &ArrayData,
    dims: &[usize],
    strides: &[usize],
    axis: usize,
    offset: usize,
) -> fmt::Result {
    if axis == dims.len() {
        return f.write_str(&element_to_string(data, offset));
    }
    let extent = dims[axis];
    let last_axis = axis + 1 == dims.len();
    // Rows of a matrix sit on their own line, pages are also separated by a blank line.
    let separator = if last_axis {
        ", ".to_string()
    } else {
        let blank = if dims.len() - axis > 2 { "\n" } else { "" };
        format!(",\n{}{}", blank, " ".repeat(axis + 1))
    };

    f.write_str("[")?;
    for (n, i) in preview_indices(extent).enumerate() {
        if n > 0 {
            f.write_str(&separator)?;
        }
        match i {
            Some(i) => write_axis(f, data, dims, strides, axis + 1, offset + i * strides[axis])?,
            None => f.write_str("…")?,
        }
    }
    f.write_str("]")
}

/// Indices shown along an axis of `extent`; `None` marks the elided middle.
fn preview_indices(extent: usize) -> Box<dyn Iterator<Item = Option<usize>>> {
    if extent <= MAX_PREVIEW {
        Box::new((0..extent).map(Some))
    } else {
        Box::new(
            (0..PREVIEW_EDGE)
                .map(Some)
                .chain(std::iter::once(None))
                .chain((extent - PREVIEW_EDGE..extent).map(Some)),
        )
    }
}

pub(crate) fn element_to_string(data: &ArrayData, idx: usize) -> String {
    match data {
        ArrayData::Numeric(buf) => format_float(buf[idx]),
        ArrayData::Boolean(buf) => (buf[idx] != 0).to_string(),
    }
}

/// Formats floating point numbers:
/// - Keeps up to 6 decimal digits
/// - Trims trailing zeroes and unnecessary decimal point
#[inline]
pub(crate) fn format_float(v: f64) -> String {
    let s = format!("{:.6}", v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
