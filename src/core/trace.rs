use std::{fs::File, io::Read, path::Path};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;

use crate::{core::series::Series, prelude::*, quantity::power::Megawatts};

/// Duration of one half-hour slot.
pub const SLOT_DURATION: TimeDelta = TimeDelta::minutes(30);

const YEAR: &str = "Year";
const MONTH: &str = "Month";
const DAY: &str = "Day";

/// Wide trace table: one row per day, one column per half-hour slot.
#[derive(Debug)]
pub struct RawTrace {
    /// Slot labels of the value columns, in the column order.
    pub slots: Vec<f64>,

    pub records: Vec<RawRecord>,
}

/// Single day of half-hour readings.
#[derive(Debug)]
pub struct RawRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,

    /// Readings in the order of [`RawTrace::slots`], `None` for an empty cell.
    pub readings: Vec<Option<Megawatts>>,
}

/// Single half-hour reading in the long form.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LongRecord {
    pub date: NaiveDate,

    /// 1-based half-hour slot.
    pub slot: f64,

    pub gen_mw: Option<Megawatts>,
}

impl RawTrace {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to read `{}`", path.display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers().context("failed to read the header")?.clone();

        let year_index = column_index(&headers, YEAR)?;
        let month_index = column_index(&headers, MONTH)?;
        let day_index = column_index(&headers, DAY)?;

        let (value_indices, slots): (Vec<usize>, Vec<f64>) = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| ![year_index, month_index, day_index].contains(index))
            .map(|(index, label)| parse_slot(label).map(|slot| (index, slot)))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .unzip();
        if slots.len() != 48 {
            warn!(n_slots = slots.len(), "unexpected number of half-hour columns");
        }

        let mut records = Vec::new();
        for (row_index, record) in reader.records().enumerate() {
            // The header is line 1.
            let line = row_index + 2;
            let record = record.with_context(|| format!("malformed record at line {line}"))?;
            let readings = value_indices
                .iter()
                .map(|index| parse_reading(&record[*index]))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("invalid reading at line {line}"))?;
            records.push(RawRecord {
                year: parse_field(&record, year_index, YEAR, line)?,
                month: parse_field(&record, month_index, MONTH, line)?,
                day: parse_field(&record, day_index, DAY, line)?,
                readings,
            });
        }

        debug!(n_days = records.len(), n_slots = slots.len(), "read the trace");
        Ok(Self { slots, records })
    }

    /// Unpivot the table into one record per day and slot.
    pub fn unpivot(&self) -> Result<Vec<LongRecord>> {
        let mut long_records = Vec::with_capacity(self.records.len() * self.slots.len());
        for record in &self.records {
            let date = record.date()?;
            long_records.extend(self.slots.iter().zip(&record.readings).map(|(slot, gen_mw)| {
                LongRecord { date, slot: *slot, gen_mw: *gen_mw }
            }));
        }
        Ok(long_records)
    }
}

impl RawRecord {
    pub fn date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).with_context(|| {
            format!("invalid date: year {}, month {}, day {}", self.year, self.month, self.day)
        })
    }
}

impl LongRecord {
    /// End of the slot: slot 1 is 00:30, slot 48 is the next day's midnight.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        let milliseconds = self.slot * SLOT_DURATION.as_seconds_f64() * 1000.0;
        #[expect(clippy::cast_possible_truncation)]
        let offset = TimeDelta::try_milliseconds(milliseconds.round() as i64)
            .with_context(|| format!("slot {} is out of range", self.slot))?;
        self.date
            .and_time(NaiveTime::MIN)
            .checked_add_signed(offset)
            .with_context(|| format!("slot {} overflows date {}", self.slot, self.date))
    }
}

/// Derive timestamps and sort the records chronologically.
///
/// Fails on a repeated timestamp, because the series is keyed by it.
#[instrument(skip_all)]
pub fn into_timestamped(
    records: impl IntoIterator<Item = LongRecord>,
) -> Result<Series<NaiveDateTime, Option<Megawatts>>> {
    let mut series = records
        .into_iter()
        .map(|record| Ok((record.timestamp()?, record.gen_mw)))
        .collect::<Result<Vec<_>>>()?;
    series.sort_by_key(|(timestamp, _)| *timestamp);
    if let Some(((timestamp, _), _)) =
        series.iter().tuple_windows().find(|((lhs, _), (rhs, _))| lhs == rhs)
    {
        bail!("duplicate timestamp: {timestamp}");
    }
    debug!(len = series.len(), "derived timestamps");
    Ok(series)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .with_context(|| format!("missing `{name}` column"))
}

fn parse_slot(label: &str) -> Result<f64> {
    let slot: f64 = label
        .parse()
        .with_context(|| format!("half-hour column label `{label}` is not a number"))?;
    ensure!(slot.is_finite(), "half-hour column label `{label}` is not finite");
    Ok(slot)
}

fn parse_reading(value: &str) -> Result<Option<Megawatts>> {
    if value.is_empty() {
        return Ok(None);
    }
    let value: f64 = value.parse().with_context(|| format!("`{value}` is not a number"))?;
    Ok((!value.is_nan()).then_some(Megawatts::from(value)))
}

fn parse_field<T>(record: &StringRecord, index: usize, name: &str, line: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = &record[index];
    value.parse().with_context(|| format!("invalid `{name}` value `{value}` at line {line}"))
}
