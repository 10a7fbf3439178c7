use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use serde::{Serialize, Serializer};

use crate::{core::series::Point, prelude::*, quantity::power::Megawatts};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default output path: the input path with `_5mininterpolated.csv` appended.
#[must_use]
pub fn output_path(input_path: &Path) -> PathBuf {
    let mut path = input_path.as_os_str().to_owned();
    path.push("_5mininterpolated.csv");
    PathBuf::from(path)
}

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Datetime", serialize_with = "serialize_timestamp")]
    timestamp: NaiveDateTime,

    gen_mw: Option<Megawatts>,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_file(series: &[Point<NaiveDateTime, Option<Megawatts>>], path: &Path) -> Result {
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    write(series, file).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(len = series.len(), "written");
    Ok(())
}

/// Write the series as `Datetime,gen_mw` CSV, missing values as empty fields.
pub fn write(series: &[Point<NaiveDateTime, Option<Megawatts>>], writer: impl Write) -> Result {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(["Datetime", "gen_mw"])?;
    for (timestamp, gen_mw) in series {
        writer.serialize(Row { timestamp: *timestamp, gen_mw: *gen_mw })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("traces/wind.csv")),
            PathBuf::from("traces/wind.csv_5mininterpolated.csv"),
        );
    }

    #[test]
    fn test_write() {
        let series = vec![
            (at(0, 30), Some(Megawatts::from(10.0))),
            (at(0, 35), Some(Megawatts::from(11.5))),
            (at(0, 40), None),
        ];
        let mut buffer = Vec::new();
        write(&series, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Datetime,gen_mw\n2020-01-01 00:30:00,10.0\n2020-01-01 00:35:00,11.5\n2020-01-01 00:40:00,\n",
        );
    }

    #[test]
    fn test_write_empty() {
        let mut buffer = Vec::new();
        write(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Datetime,gen_mw\n");
    }
}
