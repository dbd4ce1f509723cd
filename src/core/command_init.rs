//! Centralized initialization shared by the `update` and `stats` commands.
//!
//! # Initialization Steps
//! 1. **Environment validation**: `ACCESS_TOKEN` and `USER_NAME` must be present;
//!    this fails before any network call is made
//! 2. **Profile loading**: Personal rows and the open-source allow-list
//! 3. **Snapshot store**: Cache directory for LOC, PR and icon snapshots

use crate::core::{
    cache::SnapshotStore,
    config::{Config, ProfileConfig},
    error::Result,
    github::HttpTransport,
};
use std::path::PathBuf;

/// Options common to every command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub profile_path: PathBuf,
    pub cache_dir: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from("profile.json"),
            cache_dir: PathBuf::from("cache"),
        }
    }
}

/// Everything a command needs before it starts collecting.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    pub profile: ProfileConfig,
    pub store: SnapshotStore,
}

impl RunContext {
    pub fn new(config: Config, profile: ProfileConfig, store: SnapshotStore) -> Self {
        Self {
            config,
            profile,
            store,
        }
    }

    /// Validate the environment, then load the profile file.
    pub fn initialize(options: &RunOptions) -> Result<Self> {
        let config = Config::from_env()?;
        log::debug!("Collecting for {} via {}", config.user_name, config.api_url);

        let profile = ProfileConfig::load_or_default(&options.profile_path)?;
        log::debug!(
            "Open source allow-list: {}",
            profile.open_source_repos.join(", ")
        );

        Ok(Self::new(config, profile, SnapshotStore::new(&options.cache_dir)))
    }

    pub fn transport(&self) -> Result<HttpTransport> {
        HttpTransport::new(&self.config.api_url, &self.config.access_token)
    }
}
