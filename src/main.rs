//! Convert half-hourly generation traces into 5-minute interpolated time series.

mod cli;
mod core;
mod export;
mod prelude;
mod quantity;
mod tables;

use clap::crate_version;

use crate::{
    cli::Args,
    core::{
        converter::{Summary, TraceConverter},
        trace::RawTrace,
    },
    prelude::*,
    tables::build_summary_table,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let summary = run(&Args::parse_lenient())?;
    println!("{}", build_summary_table(&summary));

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(path = %args.path.display(), mode = ?args.mode))]
fn run(args: &Args) -> Result<Summary> {
    let trace = RawTrace::read(&args.path)?;
    let conversion = TraceConverter::builder()
        .trace(&trace)
        .mode(args.mode)
        .maybe_year(args.year)
        .convert()?;
    export::write_file(&conversion.series, &args.output_path())?;
    Ok(conversion.summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use itertools::Itertools;

    use super::*;
    use crate::core::mode::Mode;

    fn write_trace(directory: &tempfile::TempDir) -> std::path::PathBuf {
        let header = (1..=48).map(|slot| slot.to_string()).join(",");
        let values = (1..=48).map(|slot| if slot == 48 { 5 } else { slot * 10 }).join(",");
        let path = directory.path().join("trace.csv");
        fs::write(&path, format!("Year,Month,Day,{header}\n2020,1,1,{values}\n")).unwrap();
        path
    }

    #[test]
    fn test_run_backfill() {
        let directory = tempfile::tempdir().unwrap();
        let path = write_trace(&directory);
        let args = Args { path, year: Some(2020), mode: Mode::Backfill, output: None };

        let summary = run(&args).unwrap();
        assert_eq!(summary.n_rows, 288);

        let output_path = directory.path().join("trace.csv_5mininterpolated.csv");
        let output = fs::read_to_string(output_path).unwrap();
        let lines = output.lines().collect_vec();
        assert_eq!(lines.len(), 289);
        assert_eq!(lines[0], "Datetime,gen_mw");
        assert_eq!(lines[1], "2020-01-01 00:05:00,10.0");
        assert_eq!(lines[6], "2020-01-01 00:30:00,10.0");
        assert_eq!(lines[288], "2020-01-02 00:00:00,5.0");
    }

    #[test]
    fn test_run_missing_file() {
        let directory = tempfile::tempdir().unwrap();
        let args = Args {
            path: directory.path().join("missing.csv"),
            year: None,
            mode: Mode::Filter,
            output: None,
        };
        assert!(run(&args).is_err());
    }
}
