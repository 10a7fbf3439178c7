use bon::Builder;
use chrono::{NaiveDateTime, TimeDelta};

use crate::{
    core::{
        mode::Mode,
        series::{Interpolate, Reindex, Series},
        trace::{RawTrace, into_timestamped},
        window::YearWindow,
    },
    prelude::*,
    quantity::power::Megawatts,
};

/// Spacing of the output grid.
pub const RESAMPLING_STEP: TimeDelta = TimeDelta::minutes(5);

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct TraceConverter<'a> {
    trace: &'a RawTrace,
    mode: Mode,
    year: Option<i32>,

    #[builder(default = RESAMPLING_STEP)]
    step: TimeDelta,
}

impl<S: trace_converter_builder::IsComplete> TraceConverterBuilder<'_, S> {
    pub fn convert(self) -> Result<Conversion> {
        self.build().convert()
    }
}

#[must_use]
pub struct Conversion {
    pub series: Series<NaiveDateTime, Option<Megawatts>>,
    pub summary: Summary,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub n_days: usize,
    pub n_samples: usize,

    /// Samples left after the year window has been applied.
    pub n_windowed: usize,

    pub n_backfilled: usize,
    pub n_interpolated: usize,

    /// Output rows without a value: leading and trailing gaps.
    pub n_missing: usize,

    pub n_rows: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}

impl TraceConverter<'_> {
    #[instrument(skip_all, fields(mode = ?self.mode, year = ?self.year))]
    fn convert(self) -> Result<Conversion> {
        let window = match (self.mode, self.year) {
            (Mode::Backfill, None) => bail!("back-filling requires a year"),
            (_, year) => year.map(YearWindow::try_new).transpose()?,
        };

        let long_records = self.trace.unpivot()?;
        let n_samples = long_records.len();
        let mut series = into_timestamped(long_records)?;
        info!(n_samples, "reshaped the trace");

        if let Some(window) = window {
            series = window.filter(series);
            info!(%window, len = series.len(), "filtered");
        }
        let n_windowed = series.len();

        let n_backfilled = match (self.mode, window) {
            (Mode::Backfill, Some(window)) => window.backfill(&mut series, self.step)?,
            _ => 0,
        };
        if n_backfilled != 0 {
            info!(n_backfilled, "back-filled the leading gap");
        }

        let reindexed = series.reindex(self.step);
        let n_gaps = reindexed.iter().filter(|(_, value)| value.is_none()).count();
        let series = reindexed.interpolate();
        let n_missing = series.iter().filter(|(_, value)| value.is_none()).count();
        info!(len = series.len(), n_gaps, n_missing, "resampled");

        let summary = Summary {
            n_days: self.trace.records.len(),
            n_samples,
            n_windowed,
            n_backfilled,
            n_interpolated: n_gaps - n_missing,
            n_missing,
            n_rows: series.len(),
            first_timestamp: series.first().map(|(timestamp, _)| *timestamp),
            last_timestamp: series.last().map(|(timestamp, _)| *timestamp),
        };
        Ok(Conversion { series, summary })
    }
}
