//! Scripted GraphQL transport answering from an in-memory account description.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use profile_stats::core::{
    error::{ProfileStatsError, Result},
    github::GraphQlTransport,
};
use serde_json::{json, Value};
use std::cell::RefCell;

#[derive(Debug, Clone)]
pub struct FakeCommit {
    pub author: Option<String>,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone)]
pub struct FakeRepo {
    pub owner: String,
    pub name: String,
    pub stars: u64,
    pub has_default_branch: bool,
    /// Per-repository history queries fail for this repository
    pub failing: bool,
    pub commits: Vec<FakeCommit>,
}

#[derive(Debug, Clone)]
pub struct FakePullRequest {
    pub repo: String,
    pub number: u64,
    pub state: &'static str,
    pub created_at: DateTime<Utc>,
}

/// Everything the fake GitHub knows about one account.
#[derive(Debug, Clone)]
pub struct FakeAccount {
    pub login: String,
    pub name: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub repos: Vec<FakeRepo>,
    pub contributed_repos: u64,
    pub commit_contributions: u64,
    pub restricted_contributions: u64,
    pub issues: u64,
    pub pull_request_total: u64,
    pub pull_requests: Vec<FakePullRequest>,
}

/// Transport replaying a [`FakeAccount`] and recording every operation it serves.
pub struct ScriptedTransport {
    pub account: FakeAccount,
    calls: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(account: FakeAccount) -> Self {
        Self {
            account,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls.borrow().iter().filter(|op| *op == operation).count()
    }

    fn owned_repos(&self) -> Value {
        let edges: Vec<Value> = self
            .account
            .repos
            .iter()
            .map(|repo| {
                let branch = if repo.has_default_branch {
                    json!({ "name": "main" })
                } else {
                    Value::Null
                };
                json!({ "node": {
                    "name": repo.name,
                    "owner": { "login": repo.owner },
                    "defaultBranchRef": branch,
                }})
            })
            .collect();
        json!({ "user": { "repositories": { "edges": edges } } })
    }

    fn commit_history(&self, owner: &str, name: &str) -> Result<Value> {
        let Some(repo) = self
            .account
            .repos
            .iter()
            .find(|repo| repo.owner == owner && repo.name == name)
        else {
            return Ok(json!({ "repository": null }));
        };

        if repo.failing {
            return Err(ProfileStatsError::transport_failed(
                "getLinesOfCode",
                502,
                "Bad Gateway",
            ));
        }

        let edges: Vec<Value> = repo
            .commits
            .iter()
            .map(|commit| {
                let author = match &commit.author {
                    Some(login) => json!({ "user": { "login": login } }),
                    None => json!({ "user": null }),
                };
                json!({ "node": {
                    "additions": commit.additions,
                    "deletions": commit.deletions,
                    "author": author,
                }})
            })
            .collect();

        Ok(json!({ "repository": { "defaultBranchRef": { "target": { "history": { "edges": edges } } } } }))
    }

    fn pull_requests(&self) -> Value {
        let edges: Vec<Value> = self
            .account
            .pull_requests
            .iter()
            .map(|pr| {
                json!({ "node": {
                    "number": pr.number,
                    "title": format!("Change {}", pr.number),
                    "url": format!("https://github.com/{}/pull/{}", pr.repo, pr.number),
                    "state": pr.state,
                    "merged": pr.state == "MERGED",
                    "createdAt": pr.created_at.to_rfc3339(),
                    "repository": { "nameWithOwner": pr.repo },
                }})
            })
            .collect();
        json!({ "user": { "pullRequests": { "edges": edges } } })
    }
}

impl GraphQlTransport for ScriptedTransport {
    fn execute(&self, operation: &str, _query: &str, variables: Value) -> Result<Value> {
        self.calls.borrow_mut().push(operation.to_string());
        let account = &self.account;

        match operation {
            "getUserInfo" => Ok(json!({ "user": {
                "name": account.name,
                "followers": { "totalCount": account.followers },
                "following": { "totalCount": account.following },
            }})),
            "graphReposStars" => {
                let edges: Vec<Value> = account
                    .repos
                    .iter()
                    .map(|repo| json!({ "node": { "stargazers": { "totalCount": repo.stars } } }))
                    .collect();
                Ok(json!({ "user": { "repositories": {
                    "totalCount": account.repos.len(),
                    "edges": edges,
                }}}))
            }
            "getContributedRepos" => Ok(json!({ "user": {
                "repositoriesContributedTo": { "totalCount": account.contributed_repos },
            }})),
            "getTotalCommits" => Ok(json!({ "user": { "contributionsCollection": {
                "totalCommitContributions": account.commit_contributions,
                "restrictedContributionsCount": account.restricted_contributions,
            }}})),
            "getContributionStats" => Ok(json!({ "user": {
                "issues": { "totalCount": account.issues },
                "pullRequests": { "totalCount": account.pull_request_total },
                "repositoriesContributedTo": { "totalCount": account.contributed_repos },
            }})),
            "getLinesOfCode" => match (variables["owner"].as_str(), variables["name"].as_str()) {
                (Some(owner), Some(name)) => self.commit_history(owner, name),
                _ => Ok(self.owned_repos()),
            },
            "getOpenSourcePRs" => Ok(self.pull_requests()),
            other => Err(ProfileStatsError::graphql(other, "unknown operation")),
        }
    }
}
