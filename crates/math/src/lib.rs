//! Arithmetic helpers
//!
//! Small, dependency-free functions used by the `userkit math` commands.

pub mod fib;
pub mod sum;

pub use fib::{checked_fib, fib, MAX_FIB_INDEX};
pub use sum::{checked_sum, sum, sum_or_max};
