//! Sums with and without a ceiling

/// Add two numbers.
///
/// # Panics
///
/// Panics if the sum overflows `i64`. Use [`checked_sum`] for untrusted input.
pub fn sum(a: i64, b: i64) -> i64 {
    match checked_sum(a, b) {
        Some(total) => total,
        None => panic!("sum({}, {}) overflows i64", a, b),
    }
}

/// Add two numbers, or `None` if the sum does not fit in an `i64`
pub fn checked_sum(a: i64, b: i64) -> Option<i64> {
    a.checked_add(b)
}

/// The sum of `a` and `b` if it is strictly below `max`, otherwise `max`.
///
/// Never overflows: a sum past `i64::MAX` is at or above any `max`.
pub fn sum_or_max(a: i64, b: i64, max: i64) -> i64 {
    let total = a.saturating_add(b);

    if total < max {
        return total;
    }

    max
}
