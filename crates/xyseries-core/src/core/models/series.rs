use super::point::Point2D;
use super::scalar::Scalar;
use super::tolerance::Tolerance;
use crate::core::error::SeriesError;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

/// Selects one of the two arrays of a [`SeriesBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extrema<T> {
    pub min_x: T,
    pub max_x: T,
    pub min_y: T,
    pub max_y: T,
}

/// An ordered sequence of (x, y) pairs stored as two index-aligned arrays.
///
/// The arrays always have the same length; every operation that changes the length
/// changes both. When only Y values are supplied, X is filled with `0, 1, 2, …` and
/// [`has_user_x`](Self::has_user_x) reports `false`.
///
/// Extremum queries are served from a cache that every mutation invalidates; the first
/// query after a mutation recomputes all four extrema in one pass.
pub struct SeriesBuffer<T: Scalar> {
    x: Vec<T>,
    y: Vec<T>,
    has_user_x: bool,
    tolerance: Tolerance<T>,
    pub(crate) extrema: Cell<Option<Extrema<T>>>,
}

impl<T: Scalar> SeriesBuffer<T> {
    /// Creates an empty buffer with the default tolerance of `T`.
    pub fn new() -> Self {
        Self::with_tolerance(Tolerance::default())
    }

    /// Creates an empty buffer that compares values with `tolerance`.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Comparison policy used by searches and value histograms.
    pub fn with_tolerance(tolerance: Tolerance<T>) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            has_user_x: false,
            tolerance,
            extrema: Cell::new(None),
        }
    }

    /// Builds a buffer from Y values; X is filled with the element indices.
    ///
    /// # Arguments
    ///
    /// * `y` - The Y values. An empty input gives an empty buffer.
    ///
    /// # Return
    ///
    /// A buffer with X = `0, 1, …, len - 1` and [`has_user_x`](Self::has_user_x) unset.
    pub fn from_y(y: impl Into<Vec<T>>) -> Self {
        let y = y.into();
        let x = auto_index(y.len(), T::zero());
        Self {
            x,
            y,
            ..Self::new()
        }
    }

    /// Builds a buffer from explicit X and Y values, keeping the shorter length.
    ///
    /// # Arguments
    ///
    /// * `x` - The X values.
    /// * `y` - The Y values.
    ///
    /// # Return
    ///
    /// A buffer of `min(x.len(), y.len())` pairs with [`has_user_x`](Self::has_user_x) set.
    pub fn from_xy(x: impl Into<Vec<T>>, y: impl Into<Vec<T>>) -> Self {
        let mut x = x.into();
        let mut y = y.into();
        let n = x.len().min(y.len());
        x.truncate(n);
        y.truncate(n);
        Self {
            x,
            y,
            has_user_x: true,
            ..Self::new()
        }
    }

    /// Deep copy of a non-empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyBuffer`] if `other` is empty.
    pub fn copy_of(other: &Self) -> Result<Self, SeriesError> {
        other.ensure_not_empty()?;
        Ok(other.clone())
    }

    /// Replaces the contents with `y`, filling X with the element indices.
    ///
    /// # Arguments
    ///
    /// * `y` - The new Y values.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyInput`] if `y` is empty; the buffer is left unchanged.
    pub fn set_data_y(&mut self, y: &[T]) -> Result<(), SeriesError> {
        if y.is_empty() {
            return Err(SeriesError::EmptyInput);
        }
        self.x = auto_index(y.len(), T::zero());
        self.y = y.to_vec();
        self.has_user_x = false;
        self.invalidate();
        Ok(())
    }

    /// Replaces the contents with explicit pairs, keeping the shorter length.
    ///
    /// # Arguments
    ///
    /// * `x` - The new X values.
    /// * `y` - The new Y values.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyInput`] if either slice is empty; the buffer is left
    /// unchanged.
    pub fn set_data(&mut self, x: &[T], y: &[T]) -> Result<(), SeriesError> {
        let n = x.len().min(y.len());
        if n == 0 {
            return Err(SeriesError::EmptyInput);
        }
        self.x = x[..n].to_vec();
        self.y = y[..n].to_vec();
        self.has_user_x = true;
        self.invalidate();
        Ok(())
    }

    /// Replaces the contents with a copy of `other`, including its X provenance.
    ///
    /// The tolerance of this buffer is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyInput`] if `other` is empty.
    pub fn set_data_from(&mut self, other: &Self) -> Result<(), SeriesError> {
        if other.is_empty() {
            return Err(SeriesError::EmptyInput);
        }
        self.x.clone_from(&other.x);
        self.y.clone_from(&other.y);
        self.has_user_x = other.has_user_x;
        self.invalidate();
        Ok(())
    }

    /// Replaces the contents of `target` with a copy of this buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyBuffer`] if this buffer is empty.
    pub fn copy_to(&self, target: &mut Self) -> Result<(), SeriesError> {
        target.set_data_from(self).map_err(|_| SeriesError::EmptyBuffer)
    }

    /// Clears both vectors and fills them with the X and Y values.
    pub fn copy_into(&self, x: &mut Vec<T>, y: &mut Vec<T>) -> Result<(), SeriesError> {
        self.ensure_not_empty()?;
        x.clear();
        y.clear();
        x.extend_from_slice(&self.x);
        y.extend_from_slice(&self.y);
        Ok(())
    }

    /// Pushes the Y values onto the end of `y`.
    pub fn copy_y_into(&self, y: &mut Vec<T>) -> Result<(), SeriesError> {
        self.ensure_not_empty()?;
        y.extend_from_slice(&self.y);
        Ok(())
    }

    /// Collects the pairs as points.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyBuffer`] if the buffer is empty.
    pub fn to_points(&self) -> Result<Vec<Point2D<T>>, SeriesError> {
        self.ensure_not_empty()?;
        Ok(self.iter().collect())
    }

    /// Appends Y values, continuing X from the last stored X value in steps of one.
    pub fn append_y(&mut self, y: &[T]) -> Result<(), SeriesError> {
        if y.is_empty() {
            return Err(SeriesError::EmptyInput);
        }
        let Some(&last_x) = self.x.last() else {
            return self.set_data_y(y);
        };
        let next = auto_index(y.len(), last_x + T::one());
        self.x.extend(next);
        self.y.extend_from_slice(y);
        self.invalidate();
        Ok(())
    }

    /// Appends explicit pairs, keeping the shorter of the two slices.
    pub fn append(&mut self, x: &[T], y: &[T]) -> Result<(), SeriesError> {
        if y.is_empty() {
            return Err(SeriesError::EmptyInput);
        }
        if self.is_empty() {
            return self.set_data(x, y);
        }
        let n = x.len().min(y.len());
        if n == 0 {
            return Err(SeriesError::EmptyInput);
        }
        self.x.extend_from_slice(&x[..n]);
        self.y.extend_from_slice(&y[..n]);
        self.has_user_x = true;
        self.invalidate();
        Ok(())
    }

    /// Changes the length of both arrays; new slots are zero, `0` clears the buffer.
    ///
    /// # Arguments
    ///
    /// * `new_len` - The length after the call. Existing pairs up to it are kept.
    pub fn resize(&mut self, new_len: usize) {
        if new_len == self.len() {
            return;
        }
        if new_len == 0 {
            self.clear();
            return;
        }
        self.x.resize(new_len, T::zero());
        self.y.resize(new_len, T::zero());
        self.invalidate();
    }

    /// Overwrites the pair at `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the pair, below [`len`](Self::len).
    /// * `x` - The new X value.
    /// * `y` - The new Y value.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyBuffer`] for an empty buffer and
    /// [`SeriesError::IndexOutOfBounds`] if `index >= len`.
    pub fn set_item(&mut self, index: usize, x: T, y: T) -> Result<(), SeriesError> {
        self.check_index(index)?;
        self.x[index] = x;
        self.y[index] = y;
        self.invalidate();
        Ok(())
    }

    /// Overwrites the pair at `index` with `point`; fails like [`set_item`](Self::set_item).
    pub fn set_point(&mut self, index: usize, point: Point2D<T>) -> Result<(), SeriesError> {
        self.set_item(index, point.x, point.y)
    }

    /// Overwrites the X value at `index`; fails like [`set_item`](Self::set_item).
    pub fn set_x(&mut self, index: usize, value: T) -> Result<(), SeriesError> {
        self.check_index(index)?;
        self.x[index] = value;
        self.invalidate();
        Ok(())
    }

    /// Overwrites the Y value at `index`; fails like [`set_item`](Self::set_item).
    pub fn set_y(&mut self, index: usize, value: T) -> Result<(), SeriesError> {
        self.check_index(index)?;
        self.y[index] = value;
        self.invalidate();
        Ok(())
    }

    /// Releases both arrays.
    pub fn clear(&mut self) {
        self.x = Vec::new();
        self.y = Vec::new();
        self.has_user_x = false;
        self.invalidate();
    }

    /// Exchanges the X and Y arrays. The swapped X counts as user-supplied.
    pub fn swap_axes(&mut self) {
        if self.is_empty() {
            return;
        }
        std::mem::swap(&mut self.x, &mut self.y);
        self.has_user_x = true;
        self.invalidate();
    }

    /// Reverses the order of the pairs.
    pub fn reverse_order(&mut self) {
        if self.is_empty() {
            return;
        }
        self.x.reverse();
        self.y.reverse();
        self.invalidate();
    }

    /// Sorts the pairs by X, keeping equal keys in their current order.
    pub fn sort_by_x_ascending(&mut self) {
        self.sort_by_axis(Axis::X);
    }

    pub fn sort_by_x_descending(&mut self) {
        self.sort_by_axis(Axis::X);
        self.reverse_order();
    }

    /// Sorts the pairs by Y, keeping equal keys in their current order.
    pub fn sort_by_y_ascending(&mut self) {
        self.sort_by_axis(Axis::Y);
    }

    pub fn sort_by_y_descending(&mut self) {
        self.sort_by_axis(Axis::Y);
        self.reverse_order();
    }

    /// Stable joint sort keyed on one axis, using the IEEE 754 total order.
    fn sort_by_axis(&mut self, axis: Axis) {
        if self.len() < 2 {
            return;
        }
        let keys = self.values(axis);
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));

        self.x = order.iter().map(|&i| self.x[i]).collect();
        self.y = order.iter().map(|&i| self.y[i]).collect();
        self.invalidate();
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn length(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Whether X was supplied by the caller rather than generated from indices.
    pub fn has_user_x(&self) -> bool {
        self.has_user_x
    }

    pub fn tolerance(&self) -> &Tolerance<T> {
        &self.tolerance
    }

    /// Replaces the comparison policy. Stored values are not touched.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Policy for later searches and value histograms.
    pub fn set_tolerance(&mut self, tolerance: Tolerance<T>) {
        self.tolerance = tolerance;
    }

    pub fn x_values(&self) -> &[T] {
        &self.x
    }

    pub fn y_values(&self) -> &[T] {
        &self.y
    }

    /// The values of one axis.
    pub fn values(&self, axis: Axis) -> &[T] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// The pair at `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the pair.
    ///
    /// # Return
    ///
    /// The point `(x[index], y[index])`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyBuffer`] for an empty buffer and
    /// [`SeriesError::IndexOutOfBounds`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<Point2D<T>, SeriesError> {
        self.check_index(index)?;
        Ok(Point2D::new(self.x[index], self.y[index]))
    }

    /// The X value at `index`; fails like [`at`](Self::at).
    pub fn x_at(&self, index: usize) -> Result<T, SeriesError> {
        self.check_index(index)?;
        Ok(self.x[index])
    }

    /// The Y value at `index`; fails like [`at`](Self::at).
    pub fn y_at(&self, index: usize) -> Result<T, SeriesError> {
        self.check_index(index)?;
        Ok(self.y[index])
    }

    /// Iterates over the pairs in storage order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point2D<T>> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| Point2D::new(x, y))
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), SeriesError> {
        if self.is_empty() {
            Err(SeriesError::EmptyBuffer)
        } else {
            Ok(())
        }
    }

    fn check_index(&self, index: usize) -> Result<(), SeriesError> {
        self.ensure_not_empty()?;
        if index >= self.len() {
            return Err(SeriesError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn invalidate(&self) {
        self.extrema.set(None);
    }
}

fn auto_index<T: Scalar>(count: usize, start: T) -> Vec<T> {
    (0..count).map(|i| start + T::from_count(i)).collect()
}

impl<T: Scalar> Default for SeriesBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Clone for SeriesBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: self.y.clone(),
            has_user_x: self.has_user_x,
            tolerance: self.tolerance,
            extrema: Cell::new(self.extrema.get()),
        }
    }
}

impl<T: Scalar> fmt::Debug for SeriesBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesBuffer")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("has_user_x", &self.has_user_x)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl<T: Scalar> PartialEq for SeriesBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<T: Scalar> FromIterator<Point2D<T>> for SeriesBuffer<T> {
    fn from_iter<I: IntoIterator<Item = Point2D<T>>>(iter: I) -> Self {
        let (x, y): (Vec<T>, Vec<T>) = iter.into_iter().map(|p| (p.x, p.y)).unzip();
        Self::from_xy(x, y)
    }
}
