use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;

use crate::{
    models::{
        achievement::Achievement,
        activity::{ActivitySummary, ContributionCounts, DailyActivity},
        repository::{CommitActivityWeek, RepoDetail, RepoStats, RepoSummary},
        search::{SearchResponse, SearchResults},
        user::{GitHubUser, ProfileSummary, UserProfile},
    },
    services::{
        achievements,
        github::{ApiError, GitHubClient},
    },
};

const EVENT_PAGES_MAX: usize = 10;

/// Composes upstream calls into consolidated metrics views and performs
/// all derivation math. Holds no state beyond the client; every result
/// is computed fresh per call.
#[derive(Debug, Clone)]
pub struct MetricsService {
    github: GitHubClient,
}

impl MetricsService {
    pub fn new(github: GitHubClient) -> Self {
        Self { github }
    }

    /// Consolidated repository statistics. The repo-info fetch is
    /// primary: its failure aborts the operation. Every other fetch
    /// degrades to an empty or absent value.
    pub async fn get_repo_stats(&self, owner: &str, repo: &str) -> Result<RepoStats, ApiError> {
        let base = format!("/repos/{}/{}", owner, repo);

        let repo_info = self.github.request(&base).await?;
        let detail: RepoDetail = serde_json::from_value(repo_info)
            .map_err(|e| ApiError::Network(format!("Unexpected repository payload: {}", e)))?;

        // Independent reads with no ordering dependency.
        let contributors_path = format!("{}/contributors", base);
        let commits_path = format!("{}/commits?per_page=1", base);
        let issues_path = format!("{}/issues?state=all&per_page=1", base);
        let pulls_path = format!("{}/pulls?state=all&per_page=1", base);
        let releases_path = format!("{}/releases?per_page=1", base);
        let languages_path = format!("{}/languages", base);
        let commit_activity_path = format!("{}/stats/commit_activity", base);
        let stargazers_path = format!("{}/stargazers?per_page=1", base);
        let (contributors, commits, issues, pulls, releases, languages, commit_activity, stargazers) =
            futures::join!(
                self.github.request(&contributors_path),
                self.github.request(&commits_path),
                self.github.request(&issues_path),
                self.github.request(&pulls_path),
                self.github.request(&releases_path),
                self.github.request(&languages_path),
                self.github.request(&commit_activity_path),
                self.github.request(&stargazers_path),
            );

        // Probe kept for upstream parity; no derived field reads it.
        drop(stargazers);

        let contributors_count = contributors
            .ok()
            .as_ref()
            .and_then(Value::as_array)
            .map(|items| items.len() as u64)
            .unwrap_or(0);

        let release_count = releases
            .ok()
            .as_ref()
            .and_then(Value::as_array)
            .map(|items| items.len() as u64)
            .unwrap_or(0);

        let languages: HashMap<String, u64> = languages
            .ok()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        let commit_activity: Vec<CommitActivityWeek> = commit_activity
            .ok()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        let total_commits_52_weeks = if commit_activity.is_empty() {
            None
        } else {
            Some(commit_activity.iter().map(|week| week.total).sum())
        };

        Ok(RepoStats {
            name: detail.name,
            full_name: detail.full_name,
            description: detail.description,
            url: detail.html_url,
            stars: detail.stargazers_count,
            forks: detail.forks_count,
            watchers: detail.watchers_count,
            open_issues: detail.open_issues_count,
            language: detail.language,
            languages,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
            pushed_at: detail.pushed_at,
            license: detail.license.and_then(|license| license.name),
            contributors_count,
            latest_commit_sha: first_item_str(&commits, "sha"),
            latest_issue_number: first_item_u64(&issues, "number"),
            latest_pull_number: first_item_u64(&pulls, "number"),
            release_count,
            commit_activity,
            total_commits_52_weeks,
        })
    }

    /// Up to 100 most-recently-updated repositories, projected into
    /// summaries. Empty on any failure.
    pub async fn get_user_repos(&self, username: &str) -> Vec<RepoSummary> {
        let endpoint = format!("/users/{}/repos?per_page=100&sort=updated", username);

        match self.github.request(&endpoint).await {
            Ok(value) => match serde_json::from_value::<Vec<RepoDetail>>(value) {
                Ok(repos) => repos.into_iter().map(RepoSummary::from).collect(),
                Err(e) => {
                    tracing::warn!("Failed to parse repositories for {}: {}", username, e);
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to fetch repositories for {}: {}", username, e);
                Vec::new()
            }
        }
    }

    /// `Ok(None)` strictly means the user does not exist. Rate limiting
    /// and every other failure propagate as `Err` so callers can tell
    /// "absent" from "could not determine".
    pub async fn get_user_info(&self, username: &str) -> Result<Option<GitHubUser>, ApiError> {
        match self.github.request(&format!("/users/{}", username)).await {
            Ok(value) => {
                let user = serde_json::from_value(value)
                    .map_err(|e| ApiError::Network(format!("Unexpected user payload: {}", e)))?;
                Ok(Some(user))
            }
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Rolls up to 1000 public events into typed counters and a
    /// trailing-30-day daily series.
    pub async fn get_user_contribution_activity(&self, username: &str) -> ActivitySummary {
        let endpoint = format!("/users/{}/events/public", username);
        let events = self.github.paginated_request(&endpoint, EVENT_PAGES_MAX).await;

        summarize_events(&events, Utc::now().date_naive())
    }

    /// Pure derivation over already-fetched data; no network calls.
    pub fn calculate_user_achievements(
        &self,
        user: &GitHubUser,
        repos: &[RepoSummary],
        activity: &ActivitySummary,
    ) -> Vec<Achievement> {
        achievements::evaluate(user, repos, activity)
    }

    pub async fn get_user_profile_comprehensive(
        &self,
        username: &str,
    ) -> Result<UserProfile, ApiError> {
        let user = self
            .get_user_info(username)
            .await?
            .ok_or(ApiError::NotFound)?;

        let (repositories, activity) = futures::join!(
            self.get_user_repos(username),
            self.get_user_contribution_activity(username),
        );

        let achievements = achievements::evaluate(&user, &repositories, &activity);

        let summary = ProfileSummary {
            total_repos: repositories.len() as u64,
            total_stars: repositories.iter().map(|repo| repo.stars).sum(),
            total_forks: repositories.iter().map(|repo| repo.forks).sum(),
            followers: user.followers,
            following: user.following,
            total_contributions: activity.total_contributions,
            achievements_count: achievements.len() as u64,
        };

        Ok(UserProfile {
            user,
            repositories,
            activity,
            achievements,
            summary,
        })
    }

    /// Repository search passthrough, projected into summaries.
    pub async fn search_repos(
        &self,
        query: &str,
        sort: &str,
        order: &str,
    ) -> Result<SearchResults, ApiError> {
        let endpoint = format!(
            "/search/repositories?q={}&sort={}&order={}&per_page=20",
            query, sort, order
        );

        let value = self.github.request(&endpoint).await?;
        let response: SearchResponse = serde_json::from_value(value)
            .map_err(|e| ApiError::Network(format!("Unexpected search payload: {}", e)))?;

        Ok(response.into())
    }
}

fn first_item_str(result: &Result<Value, ApiError>, field: &str) -> Option<String> {
    result
        .as_ref()
        .ok()?
        .as_array()?
        .first()?
        .get(field)?
        .as_str()
        .map(String::from)
}

fn first_item_u64(result: &Result<Value, ApiError>, field: &str) -> Option<u64> {
    result.as_ref().ok()?.as_array()?.first()?.get(field)?.as_u64()
}

/// Buckets events by type and calendar day, then builds the 30-day
/// series anchored at `today`, oldest first.
fn summarize_events(events: &[Value], today: NaiveDate) -> ActivitySummary {
    let mut counts = ContributionCounts::default();
    let mut by_date: HashMap<String, u64> = HashMap::new();

    for event in events {
        if let Some(created_at) = event.get("created_at").and_then(Value::as_str) {
            // date portion only; time-of-day and zone are ignored
            let date = created_at.split('T').next().unwrap_or(created_at);
            *by_date.entry(date.to_string()).or_insert(0) += 1;
        }

        let event_type = event.get("type").and_then(Value::as_str).unwrap_or("");
        counts.record(event_type);
    }

    let last_30_days = (0..30)
        .rev()
        .map(|offset| {
            let date = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
            let count = by_date.get(&date).copied().unwrap_or(0);
            DailyActivity { date, count }
        })
        .collect();

    ActivitySummary {
        total_events: events.len() as u64,
        total_contributions: counts.total(),
        contributions_by_type: counts,
        last_30_days,
    }
}
