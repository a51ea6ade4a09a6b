//! Fibonacci numbers

/// Largest `n` for which `fib(n)` fits in a `u64`
pub const MAX_FIB_INDEX: u32 = 93;

/// The `n`th Fibonacci number, with `fib(0) = 0` and `fib(1) = 1`.
///
/// # Panics
///
/// Panics if `n > MAX_FIB_INDEX`. Use [`checked_fib`] for untrusted input.
pub fn fib(n: u32) -> u64 {
    match checked_fib(n) {
        Some(value) => value,
        None => panic!("fib({}) overflows u64 (max index is {})", n, MAX_FIB_INDEX),
    }
}

/// The `n`th Fibonacci number, or `None` if it does not fit in a `u64`
pub fn checked_fib(n: u32) -> Option<u64> {
    if n > MAX_FIB_INDEX {
        return None;
    }
    if n == 0 {
        return Some(0);
    }

    let (mut previous, mut current) = (0u64, 1u64);
    for _ in 1..n {
        let next = previous + current;
        previous = current;
        current = next;
    }

    Some(current)
}
