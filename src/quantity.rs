pub mod power;

use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Serialize, derive_more::Add, derive_more::From, derive_more::Sub)]
#[serde(transparent)]
pub struct Quantity<T, const POWER: isize, const TIME: isize>(pub T);
