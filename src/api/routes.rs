use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::state::AppState,
    models::{repository::UserReposResponse, search::SearchResults},
    services::github::ApiError,
};

/// Boundary mapping from the error taxonomy to transport status codes.
fn error_response(error: ApiError) -> Response {
    let status = match error {
        ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        ApiError::NotFound => StatusCode::NOT_FOUND,
        ApiError::UpstreamHttp(_) | ApiError::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({"detail": error.to_string()}))).into_response()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200),
    ),
    tag = "health",
)]
pub async fn root() -> Response {
    Json(json!({"message": "GitHub Metrics Service API"})).into_response()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200),
    ),
    tag = "health",
)]
pub async fn health_check() -> Response {
    Json(json!({"status": "healthy"})).into_response()
}

#[utoipa::path(
    get,
    path = "/api/repo/{owner}/{repo}",
    params(
        ("owner" = String, Path, description = "Repository owner"),
        ("repo" = String, Path, description = "Repository name"),
    ),
    responses(
        (status = 200, body = crate::models::repository::RepoStats),
        (status = 404),
        (status = 429),
    ),
    tag = "metrics",
)]
pub async fn get_repo_metrics(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    match state.metrics.get_repo_stats(&owner, &repo).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch stats for {}/{}: {}", owner, repo, e);
            error_response(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/user/{username}",
    params(
        ("username" = String, Path, description = "GitHub username"),
    ),
    responses(
        (status = 200, body = crate::models::user::GitHubUser),
        (status = 404),
        (status = 429),
    ),
    tag = "metrics",
)]
pub async fn get_user_info(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    match state.metrics.get_user_info(&username).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "User not found"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", username, e);
            error_response(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/user/{username}/repos",
    params(
        ("username" = String, Path, description = "GitHub username"),
    ),
    responses(
        (status = 200, body = UserReposResponse),
    ),
    tag = "metrics",
)]
pub async fn get_user_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    let repos = state.metrics.get_user_repos(&username).await;

    Json(UserReposResponse {
        count: repos.len() as u64,
        username,
        repos,
    })
    .into_response()
}

#[utoipa::path(
    get,
    path = "/api/user/{username}/profile",
    params(
        ("username" = String, Path, description = "GitHub username"),
    ),
    responses(
        (status = 200, body = crate::models::user::UserProfile),
        (status = 404),
        (status = 429),
    ),
    tag = "metrics",
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    match state.metrics.get_user_profile_comprehensive(&username).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => {
            tracing::error!("Failed to build profile for {}: {}", username, e);
            error_response(e)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_sort() -> String {
    "stars".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}

#[utoipa::path(
    get,
    path = "/api/search/repos",
    params(
        ("q" = String, Query, description = "Search query"),
        ("sort" = Option<String>, Query, description = "Sort by: stars, forks, updated"),
        ("order" = Option<String>, Query, description = "Order: asc or desc"),
    ),
    responses(
        (status = 200, body = SearchResults),
        (status = 429),
    ),
    tag = "metrics",
)]
pub async fn search_repos(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Response {
    match state
        .metrics
        .search_repos(&params.q, &params.sort, &params.order)
        .await
    {
        Ok(results) => Json(results).into_response(),
        Err(e @ ApiError::RateLimited(_)) => error_response(e),
        Err(e) => {
            tracing::warn!("Search for '{}' failed: {}", params.q, e);
            Json(SearchResults::default()).into_response()
        }
    }
}
