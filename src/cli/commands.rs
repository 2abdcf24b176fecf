use super::{Cli, Commands, ConfigAction, ExportFormat};
use crate::cli::reports::{build_monthly_report, export_csv, export_json, print_report};
use crate::jira::{fetch_month_worklogs, JiraClient};
use crate::models::{Config, WorkLogRecord};
use crate::utils::config::{get_config_path, load_config, save_config};
use crate::utils::validation::{validate_month, validate_working_days, validate_year};
use anyhow::Result;
use chrono::{Datelike, Local};
use log::info;
use std::path::PathBuf;

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check => {
            let config = load_config(cli.config.as_deref())?;
            let client = JiraClient::new(&config)?;
            client.test_connection().await?;
            println!("Connected to {} as {}", config.jira_url, config.jira_email);
            Ok(())
        }

        Commands::Members => {
            let config = load_config(cli.config.as_deref())?;
            println!("Team members ({}):", config.team_members.len());
            for member in &config.team_members {
                println!("  {}", member);
            }
            Ok(())
        }

        Commands::Report {
            year,
            month,
            working_days,
            member,
            project,
            format,
            out,
        } => {
            let config = load_config(cli.config.as_deref())?;

            let now = Local::now();
            let year = validate_year(year.unwrap_or(now.year()))?;
            let month = validate_month(month.unwrap_or(now.month()))?;
            let working_days =
                validate_working_days(working_days.unwrap_or(config.default_working_days))?;

            let client = JiraClient::new(&config)?;
            let records = fetch_month_worklogs(&client, &config, year, month).await?;
            let records = apply_filters(records, member.as_deref(), &project);

            let report = build_monthly_report(&records, year, month, working_days);
            print_report(&report);

            if let Some(format) = format {
                let output_path = out.unwrap_or_else(|| default_export_path(year, month, format));
                match format {
                    ExportFormat::Json => export_json(&report, &output_path)?,
                    ExportFormat::Csv => export_csv(&records, &output_path)?,
                }
                println!();
                println!("Exported to {}", output_path.display());
            }

            Ok(())
        }

        Commands::Config { action } => handle_config_action(action, cli.config).await,
    }
}

fn apply_filters(
    records: Vec<WorkLogRecord>,
    member: Option<&str>,
    projects: &[String],
) -> Vec<WorkLogRecord> {
    let before = records.len();
    let filtered: Vec<WorkLogRecord> = records
        .into_iter()
        .filter(|record| member.map_or(true, |m| record.author == m))
        .filter(|record| projects.is_empty() || projects.contains(&record.project_key))
        .collect();

    if filtered.len() != before {
        info!("Filtered {} of {} entries", filtered.len(), before);
    }
    filtered
}

fn default_export_path(year: i32, month: u32, format: ExportFormat) -> PathBuf {
    let extension = match format {
        ExportFormat::Json => "json",
        ExportFormat::Csv => "csv",
    };
    PathBuf::from(format!("worklog-report-{}-{:02}.{}", year, month, extension))
}

async fn handle_config_action(action: ConfigAction, config_path: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path.as_deref())?;
            let redacted = Config {
                jira_token: "********".to_string(),
                ..config
            };
            println!("{}", toml::to_string_pretty(&redacted)?);
            Ok(())
        }

        ConfigAction::Init => {
            let path = save_config(&Config::default(), config_path.as_deref())?;
            println!("Wrote default config to {}", path.display());
            println!("Fill in jira_url, jira_email, jira_token and team_members before use.");
            Ok(())
        }

        ConfigAction::Path => {
            let path = match config_path {
                Some(path) => path,
                None => get_config_path()?,
            };
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityCategory;
    use chrono::NaiveDate;

    fn sample_records() -> Vec<WorkLogRecord> {
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        vec![
            WorkLogRecord::new("QA-1", "Alice Rossi", date, 2.0, ActivityCategory::Development),
            WorkLogRecord::new("OPS-2", "Bob Neri", date, 3.0, ActivityCategory::Testing),
        ]
    }

    #[test]
    fn test_apply_filters_by_member_and_project() {
        let records = apply_filters(sample_records(), Some("Alice Rossi"), &[]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "Alice Rossi");

        let records = apply_filters(sample_records(), None, &["OPS".to_string()]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].project_key, "OPS");

        let records = apply_filters(sample_records(), None, &[]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_default_export_path() {
        assert_eq!(
            default_export_path(2026, 3, ExportFormat::Json),
            PathBuf::from("worklog-report-2026-03.json")
        );
        assert_eq!(
            default_export_path(2026, 11, ExportFormat::Csv),
            PathBuf::from("worklog-report-2026-11.csv")
        );
    }
}
