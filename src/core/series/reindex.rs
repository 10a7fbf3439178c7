use std::iter;

use chrono::{NaiveDateTime, TimeDelta};
use itertools::{EitherOrBoth, Itertools};

use crate::core::series::Series;

impl<T> Reindex for T where T: ?Sized {}

pub trait Reindex {
    /// Conform the sorted series onto a regular grid of `step`, spanning from its first key
    /// to its last key inclusive.
    ///
    /// Points off the grid are dropped, and grid keys without a point get `None`.
    #[must_use]
    fn reindex<V>(self, step: TimeDelta) -> Series<NaiveDateTime, Option<V>>
    where
        Self: IntoIterator<Item = (NaiveDateTime, Option<V>)> + Sized,
    {
        debug_assert!(step > TimeDelta::zero());

        let points = self.into_iter().collect_vec();
        let (Some(&(first_key, _)), Some(&(last_key, _))) = (points.first(), points.last()) else {
            return Vec::new();
        };
        iter::successors(Some(first_key), |key| key.checked_add_signed(step))
            .take_while(|key| *key <= last_key)
            .merge_join_by(points, |key, (point_key, _)| key.cmp(point_key))
            .filter_map(|item| match item {
                EitherOrBoth::Left(key) => Some((key, None)),
                EitherOrBoth::Both(key, (_, value)) => Some((key, value)),
                EitherOrBoth::Right(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_reindex_fills_grid() {
        let series = vec![(at(0, 30), Some(1.0)), (at(0, 45), Some(2.0))];
        assert_eq!(
            series.reindex(TimeDelta::minutes(5)),
            [
                (at(0, 30), Some(1.0)),
                (at(0, 35), None),
                (at(0, 40), None),
                (at(0, 45), Some(2.0)),
            ]
        );
    }

    #[test]
    fn test_reindex_drops_off_grid_points() {
        let series = vec![(at(0, 0), Some(1.0)), (at(0, 7), Some(9.0)), (at(0, 10), Some(2.0))];
        assert_eq!(
            series.reindex(TimeDelta::minutes(5)),
            [(at(0, 0), Some(1.0)), (at(0, 5), None), (at(0, 10), Some(2.0))]
        );
    }

    #[test]
    fn test_reindex_keeps_missing_values() {
        let series = vec![(at(0, 0), Some(1.0)), (at(0, 5), None)];
        assert_eq!(series.reindex(TimeDelta::minutes(5)), [(at(0, 0), Some(1.0)), (at(0, 5), None)]);
    }

    #[test]
    fn test_reindex_empty() {
        let series: Series<NaiveDateTime, Option<f64>> = Vec::new();
        assert!(series.reindex(TimeDelta::minutes(5)).is_empty());
    }
}
