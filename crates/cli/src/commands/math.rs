//! Math command implementation

use anyhow::Result;
use clap::Subcommand;
use userkit_math::{checked_fib, checked_sum, sum_or_max, MAX_FIB_INDEX};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MathCommands {
    /// Print the nth Fibonacci number
    Fib { n: u32 },
    /// Print a + b
    Sum {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    /// Print a + b, capped at max
    SumOrMax {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
        #[arg(allow_negative_numbers = true)]
        max: i64,
    },
}

/// Execute a math command and return the value to print
pub fn execute_math_command(command: MathCommands) -> Result<String> {
    let value = match command {
        MathCommands::Fib { n } => match checked_fib(n) {
            Some(value) => value.to_string(),
            None => anyhow::bail!(
                "fib({}) does not fit in 64 bits; n must be at most {}",
                n,
                MAX_FIB_INDEX
            ),
        },
        MathCommands::Sum { a, b } => match checked_sum(a, b) {
            Some(total) => total.to_string(),
            None => anyhow::bail!("{} + {} does not fit in 64 bits", a, b),
        },
        MathCommands::SumOrMax { a, b, max } => sum_or_max(a, b, max).to_string(),
    };

    Ok(value)
}
