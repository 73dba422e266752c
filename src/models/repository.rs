use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw repository object as returned by the GitHub API. Only the fields
/// the metrics views project out of it are declared.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub language: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub license: Option<License>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct License {
    pub name: Option<String>,
}

/// One bucket of the weekly commit-activity series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommitActivityWeek {
    pub week: i64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

/// Consolidated repository statistics, recomputed fresh on every call.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RepoStats {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub language: Option<String>,
    pub languages: HashMap<String, u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub license: Option<String>,
    pub contributors_count: u64,
    pub latest_commit_sha: Option<String>,
    pub latest_issue_number: Option<u64>,
    pub latest_pull_number: Option<u64>,
    pub release_count: u64,
    pub commit_activity: Vec<CommitActivityWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_commits_52_weeks: Option<u64>,
}

/// Lightweight per-repository view used in listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub updated_at: Option<String>,
    pub url: String,
}

impl From<RepoDetail> for RepoSummary {
    fn from(value: RepoDetail) -> Self {
        Self {
            name: value.name,
            full_name: value.full_name,
            description: value.description,
            stars: value.stargazers_count,
            forks: value.forks_count,
            language: value.language,
            updated_at: value.updated_at,
            url: value.html_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserReposResponse {
    pub username: String,
    pub repos: Vec<RepoSummary>,
    pub count: u64,
}
