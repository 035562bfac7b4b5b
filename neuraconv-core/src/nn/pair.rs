use crate::error::NeuraConvError;
use num_traits::ToPrimitive;

/// A `(height, width)` hyper-parameter such as a kernel size, stride or padding.
///
/// Built from either a scalar (broadcast to both axes) or an explicit pair of
/// any primitive integer type. Values are kept signed until validated so that a
/// negative padding is reported instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair2d {
    pub height: i64,
    pub width: i64,
}

impl Pair2d {
    pub fn new(height: i64, width: i64) -> Self {
        Pair2d { height, width }
    }

    /// Broadcasts `value` to both axes.
    pub fn square(value: i64) -> Self {
        Pair2d::new(value, value)
    }

    /// Validates that both components are at least `min` and converts to `usize`.
    ///
    /// # Errors
    /// `InvalidArgument` naming `what` if either component is below `min`.
    pub fn at_least(self, min: i64, what: &str) -> Result<(usize, usize), NeuraConvError> {
        if self.height < min || self.width < min {
            return Err(NeuraConvError::InvalidArgument(format!(
                "{} must be >= {} on both axes, got ({}, {})",
                what, min, self.height, self.width
            )));
        }
        // Both components are non-negative here.
        Ok((self.height as usize, self.width as usize))
    }
}

fn to_i64_saturating<T: ToPrimitive>(value: T) -> i64 {
    // Only unsigned values above i64::MAX fail the conversion.
    value.to_i64().unwrap_or(i64::MAX)
}

macro_rules! impl_pair2d_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Pair2d {
                fn from(value: $t) -> Self {
                    Pair2d::square(to_i64_saturating(value))
                }
            }

            impl From<($t, $t)> for Pair2d {
                fn from((height, width): ($t, $t)) -> Self {
                    Pair2d::new(to_i64_saturating(height), to_i64_saturating(width))
                }
            }
        )*
    };
}

impl_pair2d_from!(i32, i64, isize, u32, u64, usize);
