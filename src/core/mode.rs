/// How the year window is applied to the series.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Mode {
    /// Restrict the series to the year only if one is given.
    #[default]
    Filter,

    /// Always restrict the series to the year, and back-fill the leading gap with the first
    /// known value.
    Backfill,
}
