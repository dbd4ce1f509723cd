//! GraphQL documents and the response shapes the collector reads from them.
//!
//! Every query reads a single page; fields are limited to what the statistics need.

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const USER_INFO: &str = r#"
query($login: String!) {
  user(login: $login) {
    id
    name
    followers { totalCount }
    following { totalCount }
  }
}
"#;

pub const REPOS_STARS: &str = r#"
query($owner_affiliation: [RepositoryAffiliation], $login: String!, $cursor: String) {
  user(login: $login) {
    repositories(first: 100, after: $cursor, ownerAffiliations: $owner_affiliation) {
      totalCount
      edges {
        node {
          stargazers { totalCount }
        }
      }
    }
  }
}
"#;

pub const CONTRIBUTED_REPOS: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, PULL_REQUEST, ISSUE]) {
      totalCount
    }
  }
}
"#;

pub const TOTAL_COMMITS: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      totalCommitContributions
      restrictedContributionsCount
    }
  }
}
"#;

pub const CONTRIBUTION_STATS: &str = r#"
query($login: String!) {
  user(login: $login) {
    issues(first: 1) { totalCount }
    pullRequests(first: 1) { totalCount }
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, PULL_REQUEST]) {
      totalCount
    }
  }
}
"#;

pub const OWNED_REPOS: &str = r#"
query($login: String!, $cursor: String) {
  user(login: $login) {
    repositories(first: 100, after: $cursor, ownerAffiliations: [OWNER]) {
      edges {
        node {
          name
          owner { login }
          defaultBranchRef { name }
        }
      }
    }
  }
}
"#;

pub const COMMIT_HISTORY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: 100) {
            edges {
              node {
                additions
                deletions
                author {
                  user { login }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub const PULL_REQUESTS: &str = r#"
query($login: String!, $cursor: String) {
  user(login: $login) {
    pullRequests(first: 100, after: $cursor, orderBy: {field: CREATED_AT, direction: DESC}) {
      edges {
        node {
          number
          title
          url
          state
          merged
          createdAt
          repository { nameWithOwner }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct UserData<T> {
    pub user: T,
}

#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub name: Option<String>,
    pub followers: TotalCount,
    pub following: TotalCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoriesPage<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Repositories<T> {
    pub repositories: RepositoriesPage<T>,
}

#[derive(Debug, Deserialize)]
pub struct StarredRepo {
    pub stargazers: TotalCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributedTo {
    pub repositories_contributed_to: TotalCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u64,
    pub restricted_contributions_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub issues: TotalCount,
    pub pull_requests: TotalCount,
    pub repositories_contributed_to: TotalCount,
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedRepo {
    pub name: String,
    pub owner: Login,
    pub default_branch_ref: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData {
    pub repository: Option<BranchRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRepository {
    pub default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub target: Option<CommitTarget>,
}

#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub history: Option<CommitHistory>,
}

#[derive(Debug, Deserialize)]
pub struct CommitHistory {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<CommitNode>>,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    pub additions: u64,
    pub deletions: u64,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub user: Option<Login>,
}

impl CommitNode {
    pub fn authored_by(&self, login: &str) -> bool {
        self.author
            .as_ref()
            .and_then(|author| author.user.as_ref())
            .is_some_and(|user| user.login == login)
    }
}

impl RepositoryData {
    /// Commits of the default branch, empty when any level is missing.
    pub fn into_commits(self) -> Vec<CommitNode> {
        self.repository
            .and_then(|repo| repo.default_branch_ref)
            .and_then(|branch| branch.target)
            .and_then(|target| target.history)
            .map(|history| history.edges.into_iter().map(|edge| edge.node).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequests {
    pub pull_requests: PullRequestsPage,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestsPage {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<RemotePullRequest>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    /// `OPEN`, `CLOSED` or `MERGED`
    pub state: String,
    pub merged: bool,
    pub created_at: DateTime<Utc>,
    pub repository: NameWithOwner,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameWithOwner {
    pub name_with_owner: String,
}
