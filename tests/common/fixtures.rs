//! Test data generation utilities and predefined scenarios
//!
//! Provides a realistic fake account plus helpers for seeding the snapshot
//! directory with specific cache states.

#![allow(dead_code)]

use super::transport::*;
use chrono::{DateTime, TimeZone, Utc};
use profile_stats::core::{
    cache::SnapshotStore,
    command_init::RunContext,
    config::{Config, ProfileConfig},
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const LOGIN: &str = "octocat";

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn commit(author: Option<&str>, additions: u64, deletions: u64) -> FakeCommit {
    FakeCommit {
        author: author.map(str::to_string),
        additions,
        deletions,
    }
}

fn pull(repo: &str, number: u64, state: &'static str) -> FakePullRequest {
    FakePullRequest {
        repo: repo.to_string(),
        number,
        state,
        created_at: at(2024, 5, 1, 12),
    }
}

/// Scenario: an account with three owned repositories, one of which has no
/// default branch, and pull requests on allow-listed and unrelated repositories.
///
/// Authored LOC totals: 100+50+7 additions, 10+5+1 deletions.
pub fn sample_account() -> FakeAccount {
    FakeAccount {
        login: LOGIN.to_string(),
        name: Some("The Octocat".to_string()),
        followers: 4000,
        following: 9,
        repos: vec![
            FakeRepo {
                owner: LOGIN.to_string(),
                name: "hello-world".to_string(),
                stars: 30,
                has_default_branch: true,
                failing: false,
                commits: vec![
                    commit(Some(LOGIN), 100, 10),
                    commit(Some("someone-else"), 999, 999),
                    commit(Some(LOGIN), 50, 5),
                ],
            },
            FakeRepo {
                owner: LOGIN.to_string(),
                name: "spoon-knife".to_string(),
                stars: 12,
                has_default_branch: true,
                failing: false,
                commits: vec![commit(Some(LOGIN), 7, 1), commit(None, 400, 400)],
            },
            FakeRepo {
                owner: LOGIN.to_string(),
                name: "empty".to_string(),
                stars: 0,
                has_default_branch: false,
                failing: false,
                commits: Vec::new(),
            },
        ],
        contributed_repos: 6,
        commit_contributions: 420,
        restricted_contributions: 80,
        issues: 14,
        pull_request_total: 33,
        pull_requests: vec![
            pull("eslint/eslint", 101, "OPEN"),
            pull("colinhacks/zod", 202, "MERGED"),
            pull("colinhacks/zod", 203, "CLOSED"),
            pull("someone/unlisted", 404, "MERGED"),
        ],
    }
}

pub fn allow_list() -> Vec<String> {
    vec!["colinhacks/zod".to_string(), "eslint/eslint".to_string()]
}

pub fn test_config() -> Config {
    Config {
        access_token: "test-token".to_string(),
        user_name: LOGIN.to_string(),
        api_url: "http://127.0.0.1:1/graphql".to_string(),
    }
}

pub fn test_context(cache_dir: &Path) -> RunContext {
    RunContext::new(test_config(), ProfileConfig::default(), SnapshotStore::new(cache_dir))
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Seed the LOC snapshot with raw JSON using the on-disk field names.
pub fn seed_loc_cache(store: &SnapshotStore, additions: u64, deletions: u64, captured_at: DateTime<Utc>) {
    let document = serde_json::json!({
        "additions": additions,
        "deletions": deletions,
        "timestamp": captured_at.timestamp_millis(),
    });
    write_file(&store.loc_path(), &document.to_string());
}

pub fn temp_cache() -> (TempDir, SnapshotStore) {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("cache"));
    (dir, store)
}
