//! Command-line front end over the library operations

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, run};
