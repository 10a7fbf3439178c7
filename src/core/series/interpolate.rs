use std::ops::{Add, Div, Mul, Sub};

use itertools::Itertools;

use crate::core::series::Series;

impl<T> Interpolate for T where T: ?Sized {}

pub trait Interpolate {
    /// Fill the missing values linearly by the keys.
    ///
    /// Known values are kept as is. Leading and trailing gaps lack a neighbour on one side
    /// and stay missing.
    #[must_use]
    fn interpolate<K, V>(self) -> Series<K, Option<V>>
    where
        Self: IntoIterator<Item = (K, Option<V>)> + Sized,
        K: Copy + Sub<K>,
        V: Copy + Add<V, Output = V> + Sub<V, Output = V> + Div<<K as Sub<K>>::Output>,
        <V as Div<<K as Sub<K>>::Output>>::Output: Copy + Mul<<K as Sub<K>>::Output, Output = V>,
    {
        let mut points = self.into_iter().collect_vec();
        let anchors = points
            .iter()
            .enumerate()
            .filter_map(|(index, (key, value))| value.map(|value| (index, *key, value)))
            .collect_vec();
        for ((left_index, left_key, left_value), (right_index, right_key, right_value)) in
            anchors.into_iter().tuple_windows()
        {
            if right_index == left_index + 1 {
                continue;
            }
            let dvdk = (right_value - left_value) / (right_key - left_key);
            for (key, value) in &mut points[(left_index + 1)..right_index] {
                *value = Some(left_value + dvdk * (*key - left_key));
            }
        }
        points
    }
}
