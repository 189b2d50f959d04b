use num_traits::float::TotalOrder;
use num_traits::{Float, NumCast};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Element type stored in a [`SeriesBuffer`](super::series::SeriesBuffer).
///
/// Besides the floating-point arithmetic of [`Float`] and the IEEE total order of
/// [`TotalOrder`], elements must be printable and parseable so that buffers can be
/// written to and read from text files.
pub trait Scalar:
    Float + TotalOrder + Display + FromStr + Debug + Default + Send + Sync + 'static
{
    /// Absolute difference below which two values are considered equal.
    const DEFAULT_ABS_EPSILON: Self;
    /// Fraction of the larger magnitude below which two values are considered equal.
    const DEFAULT_REL_EPSILON: Self;

    /// Converts a count into the element type.
    fn from_count(count: usize) -> Self {
        <Self as NumCast>::from(count).unwrap_or_else(<Self as Float>::max_value)
    }

    /// Converts to `f64` for diagnostics and error values.
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl Scalar for f64 {
    const DEFAULT_ABS_EPSILON: Self = 1e-12;
    const DEFAULT_REL_EPSILON: Self = 1e-12;
}

impl Scalar for f32 {
    const DEFAULT_ABS_EPSILON: Self = 1e-5;
    const DEFAULT_REL_EPSILON: Self = 1e-5;
}
