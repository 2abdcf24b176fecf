pub mod client;
pub mod ingest;

pub use client::JiraClient;
pub use ingest::{auto_categorize, fetch_month_worklogs, month_window};
