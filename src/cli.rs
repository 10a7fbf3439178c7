use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::{core::mode::Mode, export};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Half-hourly trace CSV with the `Year`, `Month`, `Day` columns and the slot columns 1 to 48.
    #[clap(long, env = "TRACE_PATH")]
    pub path: PathBuf,

    /// Calendar year to restrict the output to.
    #[clap(long, env = "TRACE_YEAR", required_if_eq("mode", "backfill"))]
    pub year: Option<i32>,

    /// How the year is applied: `filter` restricts to it, `backfill` also fills the leading gap.
    #[clap(long, env = "TRACE_MODE", default_value = "filter")]
    pub mode: Mode,

    /// Output CSV, defaults to the input path with `_5mininterpolated.csv` appended.
    #[clap(long, env = "TRACE_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Parse the process arguments, accepting the single-dash `-path` and `-year` as well.
    pub fn parse_lenient() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| export::output_path(&self.path))
    }
}

fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-path") => OsString::from("--path"),
            Some("-year") => OsString::from("--year"),
            _ => arg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(normalize_legacy_flags(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_legacy_flags() {
        let args = try_parse(&["halfhour-trace", "-path", "trace.csv", "-year", "2020"]).unwrap();
        assert_eq!(args.path, PathBuf::from("trace.csv"));
        assert_eq!(args.year, Some(2020));
        assert_eq!(args.mode, Mode::Filter);
        assert_eq!(args.output_path(), PathBuf::from("trace.csv_5mininterpolated.csv"));
    }

    #[test]
    fn test_backfill_mode() {
        let args =
            try_parse(&["halfhour-trace", "--path", "trace.csv", "--year", "2021", "--mode", "backfill"])
                .unwrap();
        assert_eq!(args.mode, Mode::Backfill);
        assert_eq!(args.year, Some(2021));
    }

    #[test]
    fn test_backfill_mode_requires_year() {
        assert!(try_parse(&["halfhour-trace", "--path", "trace.csv", "--mode", "backfill"]).is_err());
    }

    #[test]
    fn test_output_override() {
        let args = try_parse(&["halfhour-trace", "--path", "in.csv", "--output", "out.csv"]).unwrap();
        assert_eq!(args.output_path(), PathBuf::from("out.csv"));
    }
}
