use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCategory {
    Development,
    Testing,
    NonDevelopment,
}

impl std::fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityCategory::Development => write!(f, "Development Activities"),
            ActivityCategory::Testing => write!(f, "Testing Activities"),
            ActivityCategory::NonDevelopment => write!(f, "Non-Development Activities"),
        }
    }
}

impl std::str::FromStr for ActivityCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development activities" | "development" | "da" => Ok(ActivityCategory::Development),
            "testing activities" | "testing" => Ok(ActivityCategory::Testing),
            "non-development activities" | "non-development" | "nda" => {
                Ok(ActivityCategory::NonDevelopment)
            }
            _ => Err(anyhow::anyhow!("Invalid activity category: {}", s)),
        }
    }
}

/// One logged time entry: one ticket, one author, one date, one duration.
/// The category is assigned once at ingestion and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogRecord {
    pub issue_key: String,
    pub project_key: String,
    pub summary: String,
    pub issue_type: String,
    pub category: ActivityCategory,
    pub author: String,
    pub date: NaiveDate,
    pub time_spent_hours: f64,
    pub comment: Option<String>,
}

impl WorkLogRecord {
    pub fn new(
        issue_key: impl Into<String>,
        author: impl Into<String>,
        date: NaiveDate,
        time_spent_hours: f64,
        category: ActivityCategory,
    ) -> Self {
        let issue_key = issue_key.into();
        let project_key = project_key_of(&issue_key);
        Self {
            issue_key,
            project_key,
            summary: String::new(),
            issue_type: String::new(),
            category,
            author: author.into(),
            date,
            time_spent_hours,
            comment: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Lowercased summary + comment, the text the NDA classifier scans.
    /// An absent comment contributes an empty string.
    pub fn classification_text(&self) -> String {
        let comment = self.comment.as_deref().unwrap_or("");
        format!("{} {}", self.summary.to_lowercase(), comment.to_lowercase())
    }
}

/// Project key is the issue key prefix before the first dash ("ABC-123" -> "ABC").
pub fn project_key_of(issue_key: &str) -> String {
    issue_key
        .split('-')
        .next()
        .unwrap_or(issue_key)
        .to_string()
}
