use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub jira_url: String,
    pub jira_email: String,
    pub jira_token: String,
    pub team_members: Vec<String>,
    pub non_dev_keywords: Vec<String>,
    pub testing_keywords: Vec<String>,
    pub default_working_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jira_url: String::new(),
            jira_email: String::new(),
            jira_token: String::new(),
            team_members: Vec::new(),
            non_dev_keywords: vec![
                "ferie".to_string(),
                "holiday".to_string(),
                "leave".to_string(),
                "pto".to_string(),
                "vacation".to_string(),
            ],
            testing_keywords: vec![
                "review".to_string(),
                "analysis".to_string(),
                "investigation".to_string(),
            ],
            default_working_days: 20,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jira_url.is_empty() || self.jira_email.is_empty() || self.jira_token.is_empty() {
            return Err(anyhow::anyhow!(
                "Jira credentials are incomplete: jira_url, jira_email and jira_token are required"
            ));
        }

        if self.team_members.is_empty() {
            return Err(anyhow::anyhow!(
                "team_members must list at least one member"
            ));
        }

        if self.default_working_days == 0 || self.default_working_days > 31 {
            return Err(anyhow::anyhow!(
                "default_working_days must be between 1 and 31"
            ));
        }

        Ok(())
    }
}
