//! Integer helpers for placement arithmetic.

/// Scales `value` by `percent / 100`, rounding toward zero and saturating at `u32::MAX`.
pub(crate) fn scale_percent(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Offset that centers a span of `inner` inside `outer`, using floor division.
///
/// The result is negative when `inner` is wider than `outer`.
pub(crate) fn center_offset(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2)
}
