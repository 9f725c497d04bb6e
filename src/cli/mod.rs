pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ScoringArgs};
pub use commands::run;
