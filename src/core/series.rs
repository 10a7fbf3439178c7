mod interpolate;
mod reindex;

pub use self::{interpolate::Interpolate, reindex::Reindex};

pub type Point<K, V> = (K, V);
pub type Series<K, V> = Vec<Point<K, V>>;
