//! CLI command modules

pub mod math;
pub mod serve;

pub use math::{execute_math_command, MathCommands};
pub use serve::{execute_serve_command, ServeArgs};
