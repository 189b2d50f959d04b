use crate::core::error::SeriesError;
use crate::core::models::point::Point2D;
use crate::core::models::scalar::Scalar;
use crate::core::models::series::{Axis, SeriesBuffer};
use crate::core::models::tolerance::Tolerance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Min,
    Max,
}

impl<T: Scalar> SeriesBuffer<T> {
    /// Index of the first pair matching both coordinates within the buffer's tolerance.
    pub fn find_index(&self, x: T, y: T) -> Result<usize, SeriesError> {
        self.ensure_not_empty()?;
        let tol = self.tolerance();
        self.x_values()
            .iter()
            .zip(self.y_values())
            .position(|(&xi, &yi)| tol.matches(xi, x) && tol.matches(yi, y))
            .ok_or(SeriesError::NotFound {
                axis: Axis::X,
                value: x.as_f64(),
            })
    }

    pub fn find_point(&self, point: Point2D<T>) -> Result<usize, SeriesError> {
        self.find_index(point.x, point.y)
    }

    pub fn find_index_x(&self, x: T) -> Result<usize, SeriesError> {
        self.find_on_axis(Axis::X, x, self.tolerance())
    }

    pub fn find_index_y(&self, y: T) -> Result<usize, SeriesError> {
        self.find_on_axis(Axis::Y, y, self.tolerance())
    }

    /// Y value of the first entry whose X matches `x`.
    pub fn y_at_x(&self, x: T) -> Result<T, SeriesError> {
        self.y_at_x_with(x, self.tolerance())
    }

    /// X value of the first entry whose Y matches `y`.
    pub fn x_at_y(&self, y: T) -> Result<T, SeriesError> {
        self.x_at_y_with(y, self.tolerance())
    }

    pub fn y_at_x_with(&self, x: T, tolerance: &Tolerance<T>) -> Result<T, SeriesError> {
        let index = self.find_on_axis(Axis::X, x, tolerance)?;
        Ok(self.y_values()[index])
    }

    pub fn x_at_y_with(&self, y: T, tolerance: &Tolerance<T>) -> Result<T, SeriesError> {
        let index = self.find_on_axis(Axis::Y, y, tolerance)?;
        Ok(self.x_values()[index])
    }

    /// Largest Y between the entries whose X match `x1` and `x2` (inclusive).
    pub fn max_y_in_x_range(&self, x1: T, x2: T) -> Result<T, SeriesError> {
        self.extremum_in_range(Axis::X, x1, x2, Extremum::Max)
    }

    /// Smallest Y between the entries whose X match `x1` and `x2` (inclusive).
    pub fn min_y_in_x_range(&self, x1: T, x2: T) -> Result<T, SeriesError> {
        self.extremum_in_range(Axis::X, x1, x2, Extremum::Min)
    }

    /// Largest X between the entries whose Y match `y1` and `y2` (inclusive).
    pub fn max_x_in_y_range(&self, y1: T, y2: T) -> Result<T, SeriesError> {
        self.extremum_in_range(Axis::Y, y1, y2, Extremum::Max)
    }

    /// Smallest X between the entries whose Y match `y1` and `y2` (inclusive).
    pub fn min_x_in_y_range(&self, y1: T, y2: T) -> Result<T, SeriesError> {
        self.extremum_in_range(Axis::Y, y1, y2, Extremum::Min)
    }

    fn find_on_axis(&self, axis: Axis, value: T, tolerance: &Tolerance<T>) -> Result<usize, SeriesError> {
        self.ensure_not_empty()?;
        self.values(axis)
            .iter()
            .position(|&v| tolerance.matches(v, value))
            .ok_or(SeriesError::NotFound {
                axis,
                value: value.as_f64(),
            })
    }

    /// Resolves both bounds on `key_axis`, then scans the other axis between them.
    fn extremum_in_range(
        &self,
        key_axis: Axis,
        from: T,
        to: T,
        which: Extremum,
    ) -> Result<T, SeriesError> {
        let start = self.find_on_axis(key_axis, from, self.tolerance())?;
        let end = self.find_on_axis(key_axis, to, self.tolerance())?;
        if end < start {
            return Err(SeriesError::InvertedRange { start, end });
        }
        let scanned = match key_axis {
            Axis::X => &self.y_values()[start..=end],
            Axis::Y => &self.x_values()[start..=end],
        };
        let first = scanned[0];
        Ok(scanned[1..].iter().fold(first, |acc, &v| match which {
            Extremum::Min => acc.min(v),
            Extremum::Max => acc.max(v),
        }))
    }
}
