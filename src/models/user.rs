use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    achievement::Achievement, activity::ActivitySummary, repository::RepoSummary,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub hireable: Option<bool>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Composite profile aggregate. Built fresh per request, never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub user: GitHubUser,
    pub repositories: Vec<RepoSummary>,
    pub activity: ActivitySummary,
    pub achievements: Vec<Achievement>,
    pub summary: ProfileSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileSummary {
    pub total_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub followers: u64,
    pub following: u64,
    pub total_contributions: u64,
    pub achievements_count: u64,
}
