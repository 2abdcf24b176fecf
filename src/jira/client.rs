use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::models::Config;

const SEARCH_PAGE_SIZE: u32 = 100;
const WORKLOG_PAGE_SIZE: u32 = 100;

/// Thin client over the Jira Cloud REST API (v2), basic auth with an API token.
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub start_at: u32,
    pub total: u32,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    pub issuetype: IssueType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogResponse {
    pub start_at: u32,
    pub total: u32,
    pub worklogs: Vec<Worklog>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    pub author: WorklogAuthor,
    /// ISO timestamp, e.g. "2026-03-04T09:30:00.000+0100".
    pub started: String,
    pub time_spent_seconds: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogAuthor {
    pub display_name: String,
}

impl JiraClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.jira_url.trim_end_matches('/').to_string(),
            email: config.jira_email.clone(),
            token: config.jira_token.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.token))
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Jira returned {} for {}", status, url));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }

    /// GET /rest/api/2/myself. Returns Ok when the credentials are accepted.
    pub async fn test_connection(&self) -> Result<()> {
        self.get_json::<serde_json::Value>("/rest/api/2/myself", &[])
            .await
            .map(|_| ())
    }

    /// Run a JQL search, following the startAt/maxResults pagination until the
    /// reported total is reached.
    pub async fn search_issues(&self, jql: &str) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut start_at = 0u32;

        loop {
            let page: SearchResponse = self
                .get_json(
                    "/rest/api/2/search",
                    &[
                        ("jql", jql.to_string()),
                        ("startAt", start_at.to_string()),
                        ("maxResults", SEARCH_PAGE_SIZE.to_string()),
                        ("fields", "summary,issuetype".to_string()),
                    ],
                )
                .await?;

            let page_len = page.issues.len() as u32;
            issues.extend(page.issues);

            start_at = page.start_at + page_len;
            if page_len == 0 || start_at >= page.total {
                break;
            }
        }

        Ok(issues)
    }

    /// Fetch every work log attached to an issue, paginated.
    pub async fn issue_worklogs(&self, issue_key: &str) -> Result<Vec<Worklog>> {
        let path = format!("/rest/api/2/issue/{}/worklog", issue_key);
        let mut worklogs = Vec::new();
        let mut start_at = 0u32;

        loop {
            let page: WorklogResponse = self
                .get_json(
                    &path,
                    &[
                        ("startAt", start_at.to_string()),
                        ("maxResults", WORKLOG_PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            let page_len = page.worklogs.len() as u32;
            worklogs.extend(page.worklogs);

            start_at = page.start_at + page_len;
            if page_len == 0 || start_at >= page.total {
                break;
            }
        }

        Ok(worklogs)
    }
}
