use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Div, Mul},
};

use chrono::TimeDelta;

use crate::quantity::Quantity;

/// Generation power, as found in the trace files.
pub type Megawatts = Quantity<f64, 1, 0>;

/// Rate of change of [`Megawatts`], used as the slope between two samples.
pub type MegawattsPerHour = Quantity<f64, 1, -1>;

const SECONDS_PER_HOUR: f64 = 3600.0;

impl Display for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} MW", self.0)
    }
}

impl Debug for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}MW", self.0)
    }
}

impl Debug for MegawattsPerHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}MW/h", self.0)
    }
}

impl Div<TimeDelta> for Megawatts {
    type Output = MegawattsPerHour;

    fn div(self, rhs: TimeDelta) -> Self::Output {
        Quantity(self.0 * SECONDS_PER_HOUR / rhs.as_seconds_f64())
    }
}

impl Mul<TimeDelta> for MegawattsPerHour {
    type Output = Megawatts;

    fn mul(self, rhs: TimeDelta) -> Self::Output {
        Quantity(self.0 * rhs.as_seconds_f64() / SECONDS_PER_HOUR)
    }
}
