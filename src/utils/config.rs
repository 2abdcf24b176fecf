use crate::models::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let worklog_dir = config_dir.join(".worklog");
    std::fs::create_dir_all(&worklog_dir)?;

    Ok(worklog_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Load configuration from the given path (or the default location), then let
/// environment variables override individual fields, then validate.
pub fn load_config(path_override: Option<&Path>) -> Result<Config> {
    let config_path = match path_override {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    let mut config = if config_path.exists() {
        let contents = std::fs::read_to_string(&config_path)?;
        toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            )
        })?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

pub fn save_config(config: &Config, path_override: Option<&Path>) -> Result<PathBuf> {
    let config_path = match path_override {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&config_path, contents)?;

    Ok(config_path)
}

/// The same environment variables the team already uses for the dashboard.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var("JIRA_URL") {
        config.jira_url = url;
    }
    if let Ok(email) = std::env::var("JIRA_EMAIL") {
        config.jira_email = email;
    }
    if let Ok(token) = std::env::var("JIRA_API_TOKEN") {
        config.jira_token = token;
    }
    if let Ok(members) = std::env::var("JIRA_TEAM_MEMBERS") {
        config.team_members = split_list(&members, false);
    }
    if let Ok(keywords) = std::env::var("JIRA_NON_DEV_KEYWORDS") {
        config.non_dev_keywords = split_list(&keywords, true);
    }
    if let Ok(keywords) = std::env::var("JIRA_TESTING_KEYWORDS") {
        config.testing_keywords = split_list(&keywords, true);
    }
}

fn split_list(raw: &str, lowercase: bool) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| {
            if lowercase {
                item.to_lowercase()
            } else {
                item.to_string()
            }
        })
        .collect()
}
