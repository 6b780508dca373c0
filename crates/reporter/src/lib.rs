pub mod cli;
pub mod render;
pub mod run;

pub use cli::{Cli, Command};
pub use run::run;
