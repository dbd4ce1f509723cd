//! Data model shared by the collector, the snapshot store and the renderer.
//!
//! # Public API
//! - [`LocSnapshot`]: Timestamped lines-of-code totals persisted between runs
//! - [`PullRequestRecord`]: One curated open-source pull request
//! - [`OssPrSnapshot`]: Persisted merged/closed pull request history
//! - [`OpenSourcePrs`]: The run's open/merged/closed view handed to rendering
//! - [`AggregateStats`]: The single flat record passed from collection to rendering
//!
//! # Snapshot Strategy
//! - **JSON serialization**: Human-readable documents, replaced wholesale
//! - **Timestamping**: LOC totals carry the time they were computed
//! - **Append-only history**: Merged/closed pull requests are never dropped

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a LOC snapshot stays authoritative.
pub fn loc_freshness_window() -> Duration {
    Duration::hours(24)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocSnapshot {
    pub additions: u64,
    pub deletions: u64,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub captured_at: DateTime<Utc>,
}

impl LocSnapshot {
    pub fn new(additions: u64, deletions: u64, captured_at: DateTime<Utc>) -> Self {
        Self {
            additions,
            deletions,
            captured_at,
        }
    }

    /// A snapshot younger than the freshness window is reused verbatim.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.captured_at) < loc_freshness_window()
    }
}

/// Identity of a pull request across runs: (repository full name, number).
pub type PrKey = (String, u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub url: String,
    /// Repository full name, `owner/name`
    pub repo: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl PullRequestRecord {
    pub fn key(&self) -> PrKey {
        (self.repo.clone(), self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Merged,
    Closed,
}

impl PrState {
    pub fn glyph(self) -> char {
        match self {
            PrState::Open => '☐',
            PrState::Merged => '☑',
            PrState::Closed => '⌧',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OssPrSnapshot {
    #[serde(default)]
    pub merged: Vec<PullRequestRecord>,
    #[serde(default)]
    pub closed: Vec<PullRequestRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSourcePrs {
    pub open: Vec<PullRequestRecord>,
    pub merged: Vec<PullRequestRecord>,
    pub closed: Vec<PullRequestRecord>,
}

impl OpenSourcePrs {
    /// All records tagged with their state, open first, then merged, then closed.
    pub fn iter_with_state(&self) -> impl Iterator<Item = (PrState, &PullRequestRecord)> {
        self.open
            .iter()
            .map(|pr| (PrState::Open, pr))
            .chain(self.merged.iter().map(|pr| (PrState::Merged, pr)))
            .chain(self.closed.iter().map(|pr| (PrState::Closed, pr)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub followers: u64,
    pub following: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionCounts {
    pub issues: u64,
    pub pull_requests: u64,
    pub open_source_contributions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub identity: UserIdentity,
    pub repos: u64,
    pub stars: u64,
    pub contributed_repos: u64,
    pub total_commits: u64,
    pub issues: u64,
    pub pull_requests: u64,
    pub open_source_contributions: u64,
    pub additions: u64,
    pub deletions: u64,
    pub open_source_prs: OpenSourcePrs,
}

impl AggregateStats {
    pub fn lines_of_code(&self) -> u64 {
        self.additions + self.deletions
    }
}
