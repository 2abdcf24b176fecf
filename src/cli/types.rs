use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "worklog")]
#[command(about = "Monthly QA team productivity metrics from Jira work logs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(long, short, help = "Verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Test the Jira connection")]
    Check,

    #[command(about = "List the configured team members")]
    Members,

    #[command(about = "Fetch a month of work logs and print the metrics report")]
    Report {
        #[arg(long, help = "Report year (defaults to the current year)")]
        year: Option<i32>,

        #[arg(long, help = "Report month 1-12 (defaults to the current month)")]
        month: Option<u32>,

        #[arg(long, help = "Working days in the month for man-day math (1-31)")]
        working_days: Option<u32>,

        #[arg(long, help = "Restrict the report to one team member")]
        member: Option<String>,

        #[arg(long, help = "Restrict the report to these project keys")]
        project: Vec<String>,

        #[arg(long, value_enum, help = "Export format")]
        format: Option<ExportFormat>,

        #[arg(long, help = "Export output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Print the active configuration (token redacted)")]
    Show,

    #[command(about = "Write a default config file to edit")]
    Init,

    #[command(about = "Print the config file path")]
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}
