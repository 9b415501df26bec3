//! Command-line interface module.

mod args;
pub mod query;

pub use args::{Cli, Commands, QueryArgs};
