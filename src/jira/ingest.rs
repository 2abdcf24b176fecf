use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use log::{info, warn};

use crate::jira::client::JiraClient;
use crate::models::{project_key_of, ActivityCategory, Config, WorkLogRecord};

/// First and last day of the given month.
pub fn month_window(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("Invalid month: {}-{:02}", year, month))?;

    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .context("Invalid month arithmetic")?;

    Ok((start, next_month - Duration::days(1)))
}

/// Keyword-based category assignment at ingestion: non-dev keywords win over
/// testing keywords, anything else is Development. The scan covers summary,
/// comment and project key, lowercased.
pub fn auto_categorize(
    summary: &str,
    comment: &str,
    project_key: &str,
    config: &Config,
) -> ActivityCategory {
    let full_text = format!(
        "{} {} {}",
        summary.to_lowercase(),
        comment.to_lowercase(),
        project_key.to_lowercase()
    );

    for keyword in &config.non_dev_keywords {
        if full_text.contains(&keyword.to_lowercase()) {
            return ActivityCategory::NonDevelopment;
        }
    }

    for keyword in &config.testing_keywords {
        if full_text.contains(&keyword.to_lowercase()) {
            return ActivityCategory::Testing;
        }
    }

    ActivityCategory::Development
}

/// Pull every work log for every configured team member inside one month.
///
/// Members are fetched sequentially; a failed issue lookup is logged and
/// skipped so one broken ticket does not sink the whole report.
pub async fn fetch_month_worklogs(
    client: &JiraClient,
    config: &Config,
    year: i32,
    month: u32,
) -> Result<Vec<WorkLogRecord>> {
    let (start, end) = month_window(year, month)?;
    let mut records = Vec::new();

    for member in &config.team_members {
        info!("Fetching work logs for {}", member);

        let jql = format!(
            "worklogAuthor = \"{}\" AND worklogDate >= \"{}\" AND worklogDate <= \"{}\"",
            member,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let issues = match client.search_issues(&jql).await {
            Ok(issues) => issues,
            Err(e) => {
                warn!("Issue search failed for {}: {}", member, e);
                continue;
            }
        };

        for issue in &issues {
            let worklogs = match client.issue_worklogs(&issue.key).await {
                Ok(worklogs) => worklogs,
                Err(e) => {
                    warn!("Work log fetch failed for {}: {}", issue.key, e);
                    continue;
                }
            };

            for worklog in worklogs {
                if worklog.author.display_name != *member {
                    continue;
                }

                let date = match parse_worklog_date(&worklog.started) {
                    Some(date) => date,
                    None => {
                        warn!("Unparseable work log date on {}: {}", issue.key, worklog.started);
                        continue;
                    }
                };

                if date < start || date > end {
                    continue;
                }

                let project_key = project_key_of(&issue.key);
                let comment = worklog.comment.clone().unwrap_or_default();
                let category = auto_categorize(
                    &issue.fields.summary,
                    &comment,
                    &project_key,
                    config,
                );

                records.push(
                    WorkLogRecord::new(
                        issue.key.clone(),
                        member.clone(),
                        date,
                        worklog.time_spent_seconds as f64 / 3600.0,
                        category,
                    )
                    .with_summary(issue.fields.summary.clone())
                    .with_issue_type(issue.fields.issuetype.name.clone())
                    .with_comment(worklog.comment),
                );
            }
        }
    }

    info!(
        "Collected {} work log entries for {}-{:02}",
        records.len(),
        year,
        month
    );
    Ok(records)
}

/// Work log timestamps carry a zone offset; the calendar date is the first 10
/// characters.
fn parse_worklog_date(started: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(started.get(..10)?, "%Y-%m-%d").ok()
}
