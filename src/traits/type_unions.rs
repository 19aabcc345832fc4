use std::fmt::Debug;

use num_traits::{One, ToPrimitive, Zero};

/// Trait for types valid as stored elements of an `ArrayValue`.
///
/// Useful when specifying `my_fn::<T: Element>() {}`.
///
/// Extends and constrains the *num-traits* `Zero`/`One` implementation to
/// fit the crate's two storage kinds: `f64` for numeric data and `u8` for
/// boolean data, where every byte is 0 or 1.
pub trait Element: Zero + One + ToPrimitive + Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    /// Coerce to the numeric domain. Booleans map to 0.0/1.0.
    fn to_numeric(self) -> f64;

    /// Coerce to the boolean domain by the nonzero test.
    fn to_truth(self) -> bool;
}

impl Element for f64 {
    #[inline(always)]
    fn to_numeric(self) -> f64 {
        self
    }

    #[inline(always)]
    fn to_truth(self) -> bool {
        // NaN is nonzero, hence true.
        self != 0.0
    }
}

impl Element for u8 {
    #[inline(always)]
    fn to_numeric(self) -> f64 {
        self.to_f64().unwrap_or_default()
    }

    #[inline(always)]
    fn to_truth(self) -> bool {
        !self.is_zero()
    }
}

/// Encodes a truth value as the boolean storage byte.
#[inline(always)]
pub fn truth_byte(b: bool) -> u8 {
    if b { u8::one() } else { u8::zero() }
}

/// Encodes a truth value as a numeric 0.0/1.0.
#[inline(always)]
pub fn truth_numeric(b: bool) -> f64 {
    if b { f64::one() } else { f64::zero() }
}
