pub mod commands;
pub mod reports;
pub mod types;

pub use clap::Parser;
pub use types::*;
