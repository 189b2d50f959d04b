use super::scalar::Scalar;
use crate::core::error::SeriesError;
use serde::{Deserialize, Serialize};

/// Floating-point comparison policy combining an absolute and a relative epsilon.
///
/// Two values match when they are identical, when their difference does not exceed
/// `abs_epsilon`, or when it does not exceed `rel_epsilon` times the larger magnitude.
/// `NaN` never matches anything, including itself, and an infinity only matches itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Epsilons<T>",
    bound(deserialize = "T: Scalar + Deserialize<'de>")
)]
pub struct Tolerance<T> {
    abs_epsilon: T,
    rel_epsilon: T,
}

/// Unvalidated form read by serde; converted through [`Tolerance::new`].
#[derive(Deserialize)]
struct Epsilons<T> {
    abs_epsilon: T,
    rel_epsilon: T,
}

impl<T: Scalar> TryFrom<Epsilons<T>> for Tolerance<T> {
    type Error = SeriesError;

    fn try_from(raw: Epsilons<T>) -> Result<Self, Self::Error> {
        Self::new(raw.abs_epsilon, raw.rel_epsilon)
    }
}

impl<T: Scalar> Tolerance<T> {
    /// Creates a comparison policy from an absolute and a relative epsilon.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidTolerance`] if either epsilon is negative or not
    /// finite, or if `rel_epsilon` is `0.5` or more.
    pub fn new(abs_epsilon: T, rel_epsilon: T) -> Result<Self, SeriesError> {
        let valid = |e: T| e.is_finite() && e >= T::zero();
        let half = T::one() / (T::one() + T::one());
        if !valid(abs_epsilon) || !valid(rel_epsilon) || rel_epsilon >= half {
            return Err(SeriesError::InvalidTolerance {
                abs_epsilon: abs_epsilon.as_f64(),
                rel_epsilon: rel_epsilon.as_f64(),
            });
        }
        Ok(Self {
            abs_epsilon,
            rel_epsilon,
        })
    }

    /// Bitwise-equal comparison only.
    pub fn exact() -> Self {
        Self {
            abs_epsilon: T::zero(),
            rel_epsilon: T::zero(),
        }
    }

    pub fn abs_epsilon(&self) -> T {
        self.abs_epsilon
    }

    pub fn rel_epsilon(&self) -> T {
        self.rel_epsilon
    }

    #[inline]
    pub fn matches(&self, a: T, b: T) -> bool {
        if a == b {
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        let diff = (a - b).abs();
        diff <= self.abs_epsilon || diff <= self.rel_epsilon * a.abs().max(b.abs())
    }

    /// Upper bound on `|a - b|` for any `b` that can match `a`.
    ///
    /// Holds because [`new`](Self::new) keeps `rel_epsilon` below `0.5`. Callers use it
    /// to narrow candidate searches and still confirm every candidate with
    /// [`matches`](Self::matches).
    pub(crate) fn search_radius(&self, a: T) -> T {
        let two = T::one() + T::one();
        self.abs_epsilon.max(two * self.rel_epsilon * a.abs())
    }
}

impl<T: Scalar> Default for Tolerance<T> {
    fn default() -> Self {
        Self {
            abs_epsilon: T::DEFAULT_ABS_EPSILON,
            rel_epsilon: T::DEFAULT_REL_EPSILON,
        }
    }
}
