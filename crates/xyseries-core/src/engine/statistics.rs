use crate::core::error::SeriesError;
use crate::core::models::scalar::Scalar;
use crate::core::models::series::{Axis, Extrema, SeriesBuffer};

/// Descriptive statistics of both axes of a buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary<T> {
    pub len: usize,
    pub min_x: T,
    pub max_x: T,
    pub mean_x: T,
    pub stddev_x: T,
    pub min_y: T,
    pub max_y: T,
    pub mean_y: T,
    pub stddev_y: T,
}

impl<T: Scalar> SeriesBuffer<T> {
    fn extrema(&self) -> Result<Extrema<T>, SeriesError> {
        self.ensure_not_empty()?;
        if let Some(cached) = self.extrema.get() {
            return Ok(cached);
        }
        let (x, y) = (self.x_values(), self.y_values());
        let mut e = Extrema {
            min_x: x[0],
            max_x: x[0],
            min_y: y[0],
            max_y: y[0],
        };
        for (&xi, &yi) in x.iter().zip(y).skip(1) {
            e.min_x = e.min_x.min(xi);
            e.max_x = e.max_x.max(xi);
            e.min_y = e.min_y.min(yi);
            e.max_y = e.max_y.max(yi);
        }
        self.extrema.set(Some(e));
        Ok(e)
    }

    pub fn min_x(&self) -> Result<T, SeriesError> {
        self.extrema().map(|e| e.min_x)
    }

    pub fn max_x(&self) -> Result<T, SeriesError> {
        self.extrema().map(|e| e.max_x)
    }

    pub fn min_y(&self) -> Result<T, SeriesError> {
        self.extrema().map(|e| e.min_y)
    }

    pub fn max_y(&self) -> Result<T, SeriesError> {
        self.extrema().map(|e| e.max_y)
    }

    pub fn index_of_min_x(&self) -> Result<usize, SeriesError> {
        self.index_of_extremum(Axis::X, |candidate, best| candidate < best)
    }

    pub fn index_of_max_x(&self) -> Result<usize, SeriesError> {
        self.index_of_extremum(Axis::X, |candidate, best| candidate > best)
    }

    pub fn index_of_min_y(&self) -> Result<usize, SeriesError> {
        self.index_of_extremum(Axis::Y, |candidate, best| candidate < best)
    }

    pub fn index_of_max_y(&self) -> Result<usize, SeriesError> {
        self.index_of_extremum(Axis::Y, |candidate, best| candidate > best)
    }

    /// First index whose value beats every earlier one under `better`.
    fn index_of_extremum(
        &self,
        axis: Axis,
        better: impl Fn(T, T) -> bool,
    ) -> Result<usize, SeriesError> {
        self.ensure_not_empty()?;
        let values = self.values(axis);
        let mut best = 0;
        for (i, &v) in values.iter().enumerate().skip(1) {
            if better(v, values[best]) || values[best].is_nan() {
                best = i;
            }
        }
        Ok(best)
    }

    pub fn sum_x(&self) -> Result<T, SeriesError> {
        self.sum(Axis::X)
    }

    pub fn sum_y(&self) -> Result<T, SeriesError> {
        self.sum(Axis::Y)
    }

    pub fn average_x(&self) -> Result<T, SeriesError> {
        self.average(Axis::X)
    }

    pub fn average_y(&self) -> Result<T, SeriesError> {
        self.average(Axis::Y)
    }

    /// Sample standard deviation of X (`N - 1` denominator, 0 for one entry).
    pub fn stddev_x(&self) -> Result<T, SeriesError> {
        self.stddev(Axis::X)
    }

    /// Sample standard deviation of Y (`N - 1` denominator, 0 for one entry).
    pub fn stddev_y(&self) -> Result<T, SeriesError> {
        self.stddev(Axis::Y)
    }

    /// Standard deviation of the mean of X: `stddev_x / sqrt(N)`.
    pub fn stddev_mean_x(&self) -> Result<T, SeriesError> {
        self.stddev_mean(Axis::X)
    }

    /// Standard deviation of the mean of Y: `stddev_y / sqrt(N)`.
    pub fn stddev_mean_y(&self) -> Result<T, SeriesError> {
        self.stddev_mean(Axis::Y)
    }

    pub fn sum(&self, axis: Axis) -> Result<T, SeriesError> {
        self.ensure_not_empty()?;
        Ok(self
            .values(axis)
            .iter()
            .fold(T::zero(), |acc, &v| acc + v))
    }

    pub fn average(&self, axis: Axis) -> Result<T, SeriesError> {
        Ok(self.sum(axis)? / T::from_count(self.len()))
    }

    pub fn stddev(&self, axis: Axis) -> Result<T, SeriesError> {
        let mean = self.average(axis)?;
        let n = self.len();
        if n == 1 {
            return Ok(T::zero());
        }
        let squares = self
            .values(axis)
            .iter()
            .fold(T::zero(), |acc, &v| acc + (v - mean) * (v - mean));
        Ok((squares / T::from_count(n - 1)).sqrt())
    }

    pub fn stddev_mean(&self, axis: Axis) -> Result<T, SeriesError> {
        Ok(self.stddev(axis)? / T::from_count(self.len()).sqrt())
    }

    pub fn summary(&self) -> Result<SeriesSummary<T>, SeriesError> {
        let e = self.extrema()?;
        Ok(SeriesSummary {
            len: self.len(),
            min_x: e.min_x,
            max_x: e.max_x,
            mean_x: self.average_x()?,
            stddev_x: self.stddev_x()?,
            min_y: e.min_y,
            max_y: e.max_y,
            mean_y: self.average_y()?,
            stddev_y: self.stddev_y()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_five() -> SeriesBuffer<f64> {
        SeriesBuffer::from_y(vec![1.0, 2.0, 3.0, 4.0, 5.0])
    }

    #[test]
    fn basic_statistics_of_one_to_five() {
        let buffer = one_to_five();
        assert_eq!(buffer.average_y().unwrap(), 3.0);
        assert_eq!(buffer.sum_y().unwrap(), 15.0);
        assert!((buffer.stddev_y().unwrap() - 1.5811388300841898).abs() < 1e-12);
        assert!(
            (buffer.stddev_mean_y().unwrap() - 1.5811388300841898 / 5f64.sqrt()).abs() < 1e-12
        );
        assert_eq!(buffer.sum_x().unwrap(), 10.0);
        assert_eq!(buffer.average_x().unwrap(), 2.0);
    }

    #[test]
    fn stddev_of_single_entry_is_zero() {
        let buffer = SeriesBuffer::from_y(vec![42.0]);
        assert_eq!(buffer.stddev_y().unwrap(), 0.0);
        assert_eq!(buffer.stddev_mean_x().unwrap(), 0.0);
    }

    #[test]
    fn extrema_follow_mutations() {
        let mut buffer = SeriesBuffer::from_xy(vec![3.0, -1.0, 2.0], vec![0.5, 9.0, -4.0]);
        assert_eq!(buffer.min_x().unwrap(), -1.0);
        assert_eq!(buffer.max_x().unwrap(), 3.0);
        assert_eq!(buffer.min_y().unwrap(), -4.0);
        assert_eq!(buffer.max_y().unwrap(), 9.0);

        buffer.set_y(0, 100.0).unwrap();
        assert_eq!(buffer.max_y().unwrap(), 100.0);

        buffer.resize(1);
        assert_eq!(buffer.min_x().unwrap(), 3.0);
        assert_eq!(buffer.max_y().unwrap(), 100.0);
    }

    #[test]
    fn index_of_extremum_prefers_first_occurrence() {
        let buffer = SeriesBuffer::from_xy(vec![2.0, 1.0, 2.0, 1.0], vec![5.0, 7.0, 7.0, 5.0]);
        assert_eq!(buffer.index_of_max_x().unwrap(), 0);
        assert_eq!(buffer.index_of_min_x().unwrap(), 1);
        assert_eq!(buffer.index_of_max_y().unwrap(), 1);
        assert_eq!(buffer.index_of_min_y().unwrap(), 0);
    }

    #[test]
    fn index_of_max_y_agrees_with_max_y() {
        let buffer = SeriesBuffer::from_y(vec![0.3, -2.0, 8.5, 8.4, 1.0]);
        let i = buffer.index_of_max_y().unwrap();
        assert_eq!(buffer.y_at(i).unwrap(), buffer.max_y().unwrap());
    }

    #[test]
    fn summary_collects_both_axes() {
        let summary = one_to_five().summary().unwrap();
        assert_eq!(summary.len, 5);
        assert_eq!(summary.min_x, 0.0);
        assert_eq!(summary.max_y, 5.0);
        assert_eq!(summary.mean_y, 3.0);
    }

    #[test]
    fn every_statistic_fails_on_empty_buffer() {
        let buffer = SeriesBuffer::<f64>::new();
        assert!(matches!(buffer.min_x(), Err(SeriesError::EmptyBuffer)));
        assert!(buffer.max_x().is_err());
        assert!(buffer.min_y().is_err());
        assert!(buffer.max_y().is_err());
        assert!(buffer.index_of_min_x().is_err());
        assert!(buffer.index_of_max_y().is_err());
        assert!(buffer.sum_y().is_err());
        assert!(buffer.average_x().is_err());
        assert!(buffer.stddev_y().is_err());
        assert!(buffer.stddev_mean_y().is_err());
        assert!(buffer.summary().is_err());
    }

    #[test]
    fn works_in_single_precision() {
        let buffer = SeriesBuffer::from_y(vec![1.0f32, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(buffer.average_y().unwrap(), 3.0f32);
        assert!((buffer.stddev_y().unwrap() - 1.581_139).abs() < 1e-5);
    }
}
