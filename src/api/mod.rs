use axum::{
    Router,
    http::{self, HeaderValue},
    routing::get,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{
        routes::{
            get_repo_metrics, get_user_info, get_user_profile, get_user_repos, health_check,
            root, search_repos,
        },
        state::AppState,
    },
    models::{
        achievement::Achievement,
        activity::{ActivitySummary, ContributionCounts, DailyActivity},
        repository::{CommitActivityWeek, RepoStats, RepoSummary, UserReposResponse},
        search::SearchResults,
        user::{GitHubUser, ProfileSummary, UserProfile},
    },
};

pub mod routes;
pub mod state;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::routes::root,
        crate::api::routes::health_check,
        crate::api::routes::get_repo_metrics,
        crate::api::routes::get_user_info,
        crate::api::routes::get_user_repos,
        crate::api::routes::get_user_profile,
        crate::api::routes::search_repos,
    ),
    components(schemas(
        RepoStats,
        CommitActivityWeek,
        RepoSummary,
        UserReposResponse,
        GitHubUser,
        UserProfile,
        ProfileSummary,
        ActivitySummary,
        ContributionCounts,
        DailyActivity,
        Achievement,
        SearchResults
    )),
    info(title = "GitHub Metrics Service", version = "1.0.0")
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .cors_allowed_origins
                .split(',')
                .map(|val| val.trim())
                .filter(|val| !val.is_empty())
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        )
        .allow_methods([http::Method::GET, http::Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::CACHE_CONTROL])
        .allow_credentials(true);

    let metrics_routes = Router::new()
        .route("/repo/{owner}/{repo}", get(get_repo_metrics))
        .route("/user/{username}", get(get_user_info))
        .route("/user/{username}/repos", get(get_user_repos))
        .route("/user/{username}/profile", get(get_user_profile))
        .route("/search/repos", get(search_repos));

    let api_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", metrics_routes)
        .layer(cors);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}
