use super::scalar::Scalar;
use super::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A single (x, y) pair read from or written to a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D<T> {
    pub x: T,
    pub y: T,
}

impl<T: Scalar> Point2D<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    pub fn set_x(&mut self, x: T) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: T) {
        self.y = y;
    }

    /// Sum of the absolute coordinates.
    pub fn manhattan_length(&self) -> T {
        self.x.abs() + self.y.abs()
    }

    /// True only when both coordinates are exactly zero.
    pub fn is_null(&self) -> bool {
        self.x == T::zero() && self.y == T::zero()
    }

    pub fn approx_eq(&self, other: &Self, tolerance: &Tolerance<T>) -> bool {
        tolerance.matches(self.x, other.x) && tolerance.matches(self.y, other.y)
    }
}

impl<T: Scalar> From<(T, T)> for Point2D<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Scalar> From<Point2D<T>> for (T, T) {
    fn from(p: Point2D<T>) -> Self {
        (p.x, p.y)
    }
}

impl<T: Scalar> Add for Point2D<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Point2D<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Scalar> Mul<T> for Point2D<T> {
    type Output = Self;
    fn mul(self, c: T) -> Self {
        Self::new(self.x * c, self.y * c)
    }
}

impl<T: Scalar> Div<T> for Point2D<T> {
    type Output = Self;
    fn div(self, c: T) -> Self {
        Self::new(self.x / c, self.y / c)
    }
}

impl<T: Scalar> Neg for Point2D<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Scalar> AddAssign for Point2D<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Point2D<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Point2D<T> {
    fn mul_assign(&mut self, c: T) {
        *self = *self * c;
    }
}

impl<T: Scalar> DivAssign<T> for Point2D<T> {
    fn div_assign(&mut self, c: T) {
        *self = *self / c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_operators_act_componentwise() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(0.5, -1.0);
        assert_eq!(a + b, Point2D::new(1.5, 1.0));
        assert_eq!(a - b, Point2D::new(0.5, 3.0));
        assert_eq!(a * 2.0, Point2D::new(2.0, 4.0));
        assert_eq!(a / 2.0, Point2D::new(0.5, 1.0));
        assert_eq!(-a, Point2D::new(-1.0, -2.0));
    }

    #[test]
    fn compound_assignment_matches_binary_operators() {
        let mut p = Point2D::new(3.0f32, 4.0);
        p += Point2D::new(1.0, 1.0);
        p -= Point2D::new(0.0, 2.0);
        p *= 2.0;
        p /= 4.0;
        assert_eq!(p, Point2D::new(2.0, 1.5));
    }

    #[test]
    fn manhattan_length_sums_absolute_coordinates() {
        assert_eq!(Point2D::new(-3.0, 4.0).manhattan_length(), 7.0);
    }

    #[test]
    fn is_null_requires_both_coordinates_zero() {
        assert!(Point2D::<f64>::default().is_null());
        assert!(!Point2D::new(0.0, 1e-300).is_null());
    }

    #[test]
    fn approx_eq_uses_the_given_tolerance() {
        let tol = Tolerance::default();
        let a = Point2D::new(0.1 + 0.2, 1.0);
        assert!(a.approx_eq(&Point2D::new(0.3, 1.0), &tol));
        assert!(!a.approx_eq(&Point2D::new(0.3, 1.1), &tol));
    }

    #[test]
    fn converts_to_and_from_tuples() {
        let p: Point2D<f64> = (1.0, 2.0).into();
        let (x, y): (f64, f64) = p.into();
        assert_eq!((x, y), (1.0, 2.0));
    }
}
