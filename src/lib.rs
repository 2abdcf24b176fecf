pub mod cli;
pub mod jira;
pub mod metrics;
pub mod models;
pub mod utils;

pub use metrics::*;
pub use models::*;
