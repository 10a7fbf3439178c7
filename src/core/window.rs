use std::{
    fmt::{Display, Formatter},
    iter,
};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::{core::series::Series, prelude::*};

/// Calendar-year window of the output series, both bounds inclusive.
///
/// It starts at the first 5-minute mark of the year and ends at the midnight the last
/// half-hour slot of the year ends at.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct YearWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Display for YearWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

impl YearWindow {
    pub fn try_new(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 5, 0))
            .with_context(|| format!("year {year} is out of range"))?;
        let end = year
            .checked_add(1)
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .with_context(|| format!("year {year} is out of range"))?;
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(self, timestamp: NaiveDateTime) -> bool {
        (self.start <= timestamp) && (timestamp <= self.end)
    }

    #[must_use]
    pub fn filter<V>(self, series: Series<NaiveDateTime, V>) -> Series<NaiveDateTime, V> {
        series.into_iter().filter(|(timestamp, _)| self.contains(*timestamp)).collect()
    }

    /// Prepend copies of the first point from the window start up to one `step` before it.
    ///
    /// Nothing happens when the first point is already at minute 5 of its hour.
    /// Returns the number of prepended points.
    pub fn backfill<V: Copy>(
        self,
        series: &mut Series<NaiveDateTime, V>,
        step: TimeDelta,
    ) -> Result<usize> {
        let Some(&(first_timestamp, first_value)) = series.first() else {
            bail!("no samples within {self} to back-fill from");
        };
        if first_timestamp.minute() == 5 {
            return Ok(0);
        }
        let last_timestamp = first_timestamp
            .checked_sub_signed(step)
            .context("the first sample is too early to back-fill")?;
        let mut backfill = iter::successors(Some(self.start), |timestamp| {
            timestamp.checked_add_signed(step)
        })
        .take_while(|timestamp| *timestamp <= last_timestamp)
        .map(|timestamp| (timestamp, first_value))
        .collect::<Vec<_>>();
        let len = backfill.len();
        backfill.append(series);
        *series = backfill;
        Ok(len)
    }
}
