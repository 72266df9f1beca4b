/// Centered moving average.
///
/// Point `i` is the mean of `values[i - window/2 ..= i + window/2]`, with the
/// range clamped to the slice, so windows shrink near both ends instead of
/// padding. A `window` of 0 or 1 returns the input unchanged.
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n - 1);
            let span = &values[start..=end];
            span.iter().sum::<f64>() / span.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_of_one_is_identity() {
        let values = [0.1, 1e6, -3.3, 0.0, 7.7];
        assert_eq!(centered_moving_average(&values, 1), values.to_vec());
    }

    #[test]
    fn window_of_zero_is_identity() {
        let values = [2.0, -1.0, 4.5];
        assert_eq!(centered_moving_average(&values, 0), values.to_vec());
    }

    #[test]
    fn window_shrinks_at_edges() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let smoothed = centered_moving_average(&values, 5);
        // [0..=2], [0..=3], [0..=4], [1..=4], [2..=4]
        assert_eq!(smoothed, vec![2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn even_window_is_symmetric() {
        // window 4 -> half 2, same span as window 5
        let values = [0.0, 0.0, 10.0, 0.0, 0.0];
        assert_eq!(
            centered_moving_average(&values, 4),
            centered_moving_average(&values, 5)
        );
    }

    #[test]
    fn wide_window_averages_everything() {
        let values = [2.0, 4.0, 6.0];
        assert_eq!(centered_moving_average(&values, 99), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn empty_input() {
        assert!(centered_moving_average(&[], 5).is_empty());
    }
}
