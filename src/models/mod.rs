pub mod config;
pub mod worklog;

pub use config::Config;
pub use worklog::{project_key_of, ActivityCategory, WorkLogRecord};
