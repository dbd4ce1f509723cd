use crate::core::error::{ProfileStatsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";
pub const USER_NAME_VAR: &str = "USER_NAME";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Identifiers taken from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    pub user_name: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (Some(access_token), Some(user_name)) =
            (present(ACCESS_TOKEN_VAR), present(USER_NAME_VAR))
        else {
            return Err(ProfileStatsError::config_error(format!(
                "{ACCESS_TOKEN_VAR} and {USER_NAME_VAR} environment variables are required"
            )));
        };

        Ok(Self {
            access_token,
            user_name,
            api_url: present(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub label: String,
    pub value: String,
}

/// Personal rows and curation settings read from the profile file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileConfig {
    /// Overrides the account's display name in the header
    pub display_name: Option<String>,
    pub about: Vec<ProfileRow>,
    pub contact: Vec<ProfileRow>,
    /// `owner/name` repositories whose pull requests are curated
    pub open_source_repos: Vec<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name: None,
            about: Vec::new(),
            contact: Vec::new(),
            open_source_repos: vec!["colinhacks/zod".to_string(), "eslint/eslint".to_string()],
        }
    }
}

impl ProfileConfig {
    /// Load the profile file, or defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No profile file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            ProfileStatsError::ProfileReadFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        serde_json::from_str(&content).map_err(|source| ProfileStatsError::ProfileParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}
