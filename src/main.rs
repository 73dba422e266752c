use anyhow::{Error, Result};
use gitmetrics::{
    api::{build_router, state::AppState},
    config::{logging::setup_logging, settings::Config},
    services::{github::GitHubClient, metrics::MetricsService},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _guard = setup_logging();

    let config = Config::load()?;

    tracing::info!(
        "GitHub token: {}",
        match config.github_token.is_some() {
            true => "configured",
            false => "not configured",
        }
    );

    tracing::info!("GitHub API url: {}", config.github_api_url);

    let github_client = GitHubClient::new(config.github_token.clone(), &config.github_api_url)?;

    tracing::info!("GitHub client initialized");

    let metrics = MetricsService::new(github_client);

    let addr = format!("{}:{}", &config.host, &config.port);

    let state = AppState { metrics, config };

    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
