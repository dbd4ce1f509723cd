//! Statistics collection over the GraphQL transport.
//!
//! [`StatsCollector`] issues the fixed set of queries one after another and applies the
//! two caching policies:
//! - **LOC snapshot**: reused verbatim while younger than 24 hours, otherwise recomputed
//!   from the default-branch history of every owned repository and replaced
//! - **Open-source PR history**: merged/closed pull requests on allow-listed
//!   repositories are appended to the persisted snapshot by identity key and never
//!   removed; open pull requests are recomputed every run and never persisted
//!
//! Known bound: repository, star and LOC queries read a single page of 100
//! repositories, so larger accounts are undercounted.

use crate::core::{
    cache::SnapshotStore,
    error::{ProfileStatsError, Result},
    github::GraphQlTransport,
    queries::{self, Edge, RemotePullRequest, UserData},
    state::{
        AggregateStats, ContributionCounts, LocSnapshot, OpenSourcePrs, OssPrSnapshot,
        PrKey, PullRequestRecord, UserIdentity,
    },
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// What `fetch_repo_and_star_counts` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoCountKind {
    Repos,
    Stars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Affiliation {
    Owner,
}

/// Per-operation query counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCounter {
    counts: BTreeMap<&'static str, u32>,
}

impl QueryCounter {
    pub fn record(&mut self, operation: &'static str) {
        *self.counts.entry(operation).or_insert(0) += 1;
    }

    pub fn get(&self, operation: &str) -> u32 {
        self.counts.get(operation).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl fmt::Display for QueryCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (operation, count) in &self.counts {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{operation}={count}")?;
            first = false;
        }
        Ok(())
    }
}

/// Running LOC totals plus the repositories whose history could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocTally {
    pub additions: u64,
    pub deletions: u64,
    pub skipped: Vec<String>,
}

impl LocTally {
    fn absorb(mut self, login: &str, commits: &[queries::CommitNode]) -> Self {
        for commit in commits.iter().filter(|commit| commit.authored_by(login)) {
            self.additions += commit.additions;
            self.deletions += commit.deletions;
        }
        self
    }

    fn skip(mut self, repository: String) -> Self {
        self.skipped.push(repository);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocReport {
    pub snapshot: LocSnapshot,
    /// `None` when the cached snapshot was reused
    pub tally: Option<LocTally>,
}

pub struct StatsCollector<'a, T: GraphQlTransport + ?Sized> {
    transport: &'a T,
    store: &'a SnapshotStore,
    login: String,
    counter: QueryCounter,
}

impl<'a, T: GraphQlTransport + ?Sized> StatsCollector<'a, T> {
    pub fn new(transport: &'a T, store: &'a SnapshotStore, login: impl Into<String>) -> Self {
        Self {
            transport,
            store,
            login: login.into(),
            counter: QueryCounter::default(),
        }
    }

    pub fn counter(&self) -> &QueryCounter {
        &self.counter
    }

    fn query<R: DeserializeOwned>(
        &mut self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<R> {
        self.counter.record(operation);
        log::debug!("Running {operation}");
        let data = self.transport.execute(operation, query, variables)?;
        serde_json::from_value(data)
            .map_err(|e| ProfileStatsError::unexpected_response(operation, e))
    }

    pub fn fetch_user_identity(&mut self) -> Result<UserIdentity> {
        let data: UserData<queries::UserInfo> =
            self.query("getUserInfo", queries::USER_INFO, json!({ "login": self.login }))?;

        let name = data
            .user
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.login.clone());

        Ok(UserIdentity {
            name,
            followers: data.user.followers.total_count,
            following: data.user.following.total_count,
        })
    }

    /// Repository count or summed stars over the first page of repositories.
    pub fn fetch_repo_and_star_counts(
        &mut self,
        kind: RepoCountKind,
        affiliations: &[Affiliation],
    ) -> Result<u64> {
        let variables = json!({
            "owner_affiliation": affiliations,
            "login": self.login,
            "cursor": Value::Null,
        });
        let data: UserData<queries::Repositories<queries::StarredRepo>> =
            self.query("graphReposStars", queries::REPOS_STARS, variables)?;

        let repositories = data.user.repositories;
        Ok(match kind {
            RepoCountKind::Repos => repositories.total_count,
            RepoCountKind::Stars => repositories
                .edges
                .iter()
                .map(|edge| edge.node.stargazers.total_count)
                .sum(),
        })
    }

    pub fn fetch_contributed_repo_count(&mut self) -> Result<u64> {
        let data: UserData<queries::ContributedTo> = self.query(
            "getContributedRepos",
            queries::CONTRIBUTED_REPOS,
            json!({ "login": self.login }),
        )?;
        Ok(data.user.repositories_contributed_to.total_count)
    }

    pub fn fetch_total_commit_count(&mut self) -> Result<u64> {
        let data: UserData<queries::Contributions> = self.query(
            "getTotalCommits",
            queries::TOTAL_COMMITS,
            json!({ "login": self.login }),
        )?;
        let collection = data.user.contributions_collection;
        Ok(collection.total_commit_contributions + collection.restricted_contributions_count)
    }

    pub fn fetch_issue_pr_contribution_counts(&mut self) -> Result<ContributionCounts> {
        let data: UserData<queries::ContributionStats> = self.query(
            "getContributionStats",
            queries::CONTRIBUTION_STATS,
            json!({ "login": self.login }),
        )?;
        Ok(ContributionCounts {
            issues: data.user.issues.total_count,
            pull_requests: data.user.pull_requests.total_count,
            open_source_contributions: data.user.repositories_contributed_to.total_count,
        })
    }

    pub fn fetch_lines_of_code(&mut self) -> Result<LocReport> {
        self.fetch_lines_of_code_at(Utc::now())
    }

    /// LOC totals as of `now`, reusing the cached snapshot while it is fresh.
    pub fn fetch_lines_of_code_at(&mut self, now: DateTime<Utc>) -> Result<LocReport> {
        if let Some(snapshot) = self.store.load_loc().filter(|s| s.is_fresh_at(now)) {
            log::info!(
                "Using cached LOC (last updated: {})",
                snapshot.captured_at.to_rfc3339()
            );
            return Ok(LocReport {
                snapshot,
                tally: None,
            });
        }

        log::info!("Recomputing LOC...");
        let data: UserData<queries::Repositories<queries::OwnedRepo>> = self.query(
            "getLinesOfCode",
            queries::OWNED_REPOS,
            json!({ "login": self.login, "cursor": Value::Null }),
        )?;

        let repos = data
            .user
            .repositories
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .filter(|repo| repo.default_branch_ref.is_some());

        let mut tally = LocTally::default();
        for repo in repos {
            let full_name = format!("{}/{}", repo.owner.login, repo.name);
            let variables = json!({ "owner": repo.owner.login, "name": repo.name });
            tally = match self.query::<queries::RepositoryData>(
                "getLinesOfCode",
                queries::COMMIT_HISTORY,
                variables,
            ) {
                Ok(history) => tally.absorb(&self.login, &history.into_commits()),
                Err(e) => {
                    log::debug!("Skipping {full_name}: {e}");
                    tally.skip(full_name)
                }
            };
        }

        if !tally.skipped.is_empty() {
            log::warn!(
                "LOC skipped {} repositories: {}",
                tally.skipped.len(),
                tally.skipped.join(", ")
            );
        }

        let snapshot = LocSnapshot::new(tally.additions, tally.deletions, now);
        self.store.store_loc(&snapshot);

        Ok(LocReport {
            snapshot,
            tally: Some(tally),
        })
    }

    /// Curated pull requests on allow-listed repositories, merged into the persisted history.
    pub fn fetch_open_source_pull_requests(&mut self, allow_list: &[String]) -> Result<OpenSourcePrs> {
        let cached = self.store.load_oss_prs();

        let data: UserData<queries::PullRequests> = self.query(
            "getOpenSourcePRs",
            queries::PULL_REQUESTS,
            json!({ "login": self.login, "cursor": Value::Null }),
        )?;
        let fetched = data.user.pull_requests.edges.into_iter().map(|Edge { node }| node);

        let result = merge_pull_requests(cached, fetched, allow_list);
        self.store.store_oss_prs(&OssPrSnapshot {
            merged: result.merged.clone(),
            closed: result.closed.clone(),
        });

        log::info!(
            "Open source PRs: {} open, {} merged, {} closed",
            result.open.len(),
            result.merged.len(),
            result.closed.len()
        );
        Ok(result)
    }

    /// Run every query in order and assemble the aggregate record.
    pub fn collect(&mut self, allow_list: &[String]) -> Result<AggregateStats> {
        let identity = self.fetch_user_identity()?;
        log::info!("User: {}", identity.name);

        let repos = self.fetch_repo_and_star_counts(RepoCountKind::Repos, &[Affiliation::Owner])?;
        let stars = self.fetch_repo_and_star_counts(RepoCountKind::Stars, &[Affiliation::Owner])?;
        let contributed_repos = self.fetch_contributed_repo_count()?;
        let total_commits = self.fetch_total_commit_count()?;
        let contributions = self.fetch_issue_pr_contribution_counts()?;
        let loc = self.fetch_lines_of_code()?;
        let open_source_prs = self.fetch_open_source_pull_requests(allow_list)?;

        Ok(AggregateStats {
            identity,
            repos,
            stars,
            contributed_repos,
            total_commits,
            issues: contributions.issues,
            pull_requests: contributions.pull_requests,
            open_source_contributions: contributions.open_source_contributions,
            additions: loc.snapshot.additions,
            deletions: loc.snapshot.deletions,
            open_source_prs,
        })
    }
}

/// Merge one page of remote pull requests into the cached history.
///
/// Only allow-listed repositories are considered. Open pull requests are returned but
/// never become part of the history; merged/closed ones are appended only when their
/// identity key is not already recorded in either set.
pub fn merge_pull_requests<I>(cached: OssPrSnapshot, fetched: I, allow_list: &[String]) -> OpenSourcePrs
where
    I: IntoIterator<Item = RemotePullRequest>,
{
    let mut known: HashSet<PrKey> = cached
        .merged
        .iter()
        .chain(cached.closed.iter())
        .map(PullRequestRecord::key)
        .collect();

    let mut result = OpenSourcePrs {
        open: Vec::new(),
        merged: cached.merged,
        closed: cached.closed,
    };

    for remote in fetched {
        if !allow_list.contains(&remote.repository.name_with_owner) {
            continue;
        }

        let is_open = remote.state == "OPEN";
        let merged = remote.merged;
        let record = PullRequestRecord {
            number: remote.number,
            title: remote.title,
            url: remote.url,
            repo: remote.repository.name_with_owner,
            created_at: remote.created_at,
        };

        if is_open {
            result.open.push(record);
        } else if known.insert(record.key()) {
            if merged {
                result.merged.push(record);
            } else {
                result.closed.push(record);
            }
        }
    }

    result
}
