//! Shared arithmetic with explicit zero-denominator fallbacks.

/// `count / base * 100`, or 0 when `base` is 0.
pub fn percentage(count: usize, base: usize) -> f64 {
    if base == 0 {
        0.0
    } else {
        count as f64 / base as f64 * 100.0
    }
}

/// Arithmetic mean of path lengths, or 0 for an empty sequence.
pub fn mean_len(lengths: impl IntoIterator<Item = usize>) -> f64 {
    let (sum, n) = lengths
        .into_iter()
        .fold((0usize, 0usize), |(sum, n), len| (sum + len, n + 1));
    if n == 0 {
        0.0
    } else {
        sum as f64 / n as f64
    }
}
