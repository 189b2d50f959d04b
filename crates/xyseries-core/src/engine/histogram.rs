use crate::core::error::SeriesError;
use crate::core::models::scalar::Scalar;
use crate::core::models::series::{Axis, SeriesBuffer};
use crate::core::models::tolerance::Tolerance;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Upper bound on the number of distinct values a histogram may hold.
pub const MAX_HISTOGRAM_GROUPS: usize = 1_000_000;

/// Map key ordered by the IEEE 754 total order.
#[derive(Debug, Clone, Copy)]
struct OrderedKey<T>(T);

impl<T: Scalar> PartialEq for OrderedKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Scalar> Eq for OrderedKey<T> {}

impl<T: Scalar> PartialOrd for OrderedKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scalar> Ord for OrderedKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

struct Group<T> {
    value: T,
    count: usize,
}

/// Groups `values` by approximate equality, keeping groups in first-seen order.
///
/// A value joins the earliest group whose representative (its first member) matches it
/// under `tolerance`; otherwise it opens a new group. NaNs share one group and infinities
/// only match themselves.
fn group_values<T: Scalar>(
    values: &[T],
    tolerance: &Tolerance<T>,
    limit: usize,
) -> Result<Vec<Group<T>>, SeriesError> {
    let mut groups: Vec<Group<T>> = Vec::new();
    let mut index: BTreeMap<OrderedKey<T>, usize> = BTreeMap::new();
    let mut nan_slot: Option<usize> = None;

    for &value in values {
        let slot = if value.is_nan() {
            nan_slot
        } else if value.is_infinite() {
            index.get(&OrderedKey(value)).copied()
        } else {
            let key = normalize_zero(value);
            let radius = tolerance.search_radius(key);
            index
                .range(OrderedKey(key - radius)..=OrderedKey(key + radius))
                .filter(|(rep, _)| rep.0.is_finite() && tolerance.matches(rep.0, key))
                .map(|(_, &slot)| slot)
                .min()
        };

        match slot {
            Some(slot) => groups[slot].count += 1,
            None => {
                if groups.len() >= limit {
                    return Err(SeriesError::GroupingLimit { limit });
                }
                let slot = groups.len();
                if value.is_nan() {
                    nan_slot = Some(slot);
                } else {
                    index.insert(OrderedKey(normalize_zero(value)), slot);
                }
                groups.push(Group { value, count: 1 });
            }
        }
    }
    Ok(groups)
}

/// Maps `-0.0` onto `+0.0` so both sit at the same place in the total order.
#[inline]
fn normalize_zero<T: Scalar>(value: T) -> T {
    if value == T::zero() { T::zero() } else { value }
}

impl<T: Scalar> SeriesBuffer<T> {
    /// Counts how often each distinct value of `axis` occurs.
    ///
    /// The result holds the distinct values in X, in the order they are first seen, and
    /// their occurrence counts in Y. Values are compared with this buffer's tolerance,
    /// which the result inherits. The source buffer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyBuffer`] for an empty buffer and
    /// [`SeriesError::GroupingLimit`] when more than [`MAX_HISTOGRAM_GROUPS`] distinct
    /// values are found.
    pub fn make_value_histogram(&self, axis: Axis) -> Result<SeriesBuffer<T>, SeriesError> {
        self.ensure_not_empty()?;
        let groups = group_values(self.values(axis), self.tolerance(), MAX_HISTOGRAM_GROUPS)?;
        debug!(
            "Grouped {} {} values into {} distinct values.",
            self.len(),
            axis,
            groups.len()
        );

        let (values, counts): (Vec<T>, Vec<T>) = groups
            .into_iter()
            .map(|g| (g.value, T::from_count(g.count)))
            .unzip();
        let mut histogram = SeriesBuffer::from_xy(values, counts);
        histogram.set_tolerance(*self.tolerance());
        Ok(histogram)
    }

    pub fn make_y_histogram(&self) -> Result<SeriesBuffer<T>, SeriesError> {
        self.make_value_histogram(Axis::Y)
    }

    pub fn make_x_histogram(&self) -> Result<SeriesBuffer<T>, SeriesError> {
        self.make_value_histogram(Axis::X)
    }
}
