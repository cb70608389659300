pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FilterArgs, OutputArgs};
pub use commands::run;
