use num_traits::{Float, FromPrimitive};

/// Returns `n` evenly spaced values from `y_start` to `y_end`
/// inclusive.
///
/// The last value is exactly `y_end`. Yields nothing for `n == 0`
/// and only `y_end` for `n == 1`.
pub fn linspace<T>(y_start: T, y_end: T, n: usize) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    let last = n.saturating_sub(1);
    let dy = (y_end - y_start) / T::from(last).unwrap();
    (0..n).map(move |x| {
        if x == last {
            y_end
        } else {
            y_start + T::from(x).unwrap() * dy
        }
    })
}
