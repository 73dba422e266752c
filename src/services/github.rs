use anyhow::{Context, Result};
use axum::http::{HeaderMap, HeaderValue};
use reqwest::{
    StatusCode,
    header::{ACCEPT, USER_AGENT},
};
use serde_json::Value;
use thiserror::Error;

const PER_PAGE: usize = 100;

/// Every upstream failure becomes a value of this type; nothing is
/// raised past the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    RateLimited(String),

    #[error("Resource not found")]
    NotFound,

    #[error("GitHub API error: {0}")]
    UpstreamHttp(u16),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(github_token: Option<String>, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_static("gitmetrics-service"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = github_token {
            let auth_value = format!("Bearer {}", token);

            headers.insert(
                "Authorization",
                HeaderValue::from_str(auth_value.as_str()).context("Invalid GitHub token format")?,
            );
        } else {
            tracing::warn!("No GitHub token provided - using unauthenticated requests");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues one GET against `base_url + endpoint`.
    pub async fn request(&self, endpoint: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Error fetching {}: {}", url, e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        if status == StatusCode::FORBIDDEN {
            let body: Value = response.json().await.unwrap_or(Value::Null);

            if let Some(message) = body.get("message").and_then(Value::as_str) {
                if message.to_lowercase().contains("rate limit") {
                    tracing::warn!("Rate limit exceeded: {}", message);

                    return Err(ApiError::RateLimited(format!(
                        "GitHub API rate limit exceeded. {}",
                        message
                    )));
                }
            }

            return Err(ApiError::UpstreamHttp(403));
        }

        if !status.is_success() {
            tracing::error!("Error fetching {}: status {}", url, status);
            return Err(ApiError::UpstreamHttp(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Walks pages starting at 1 and concatenates the returned arrays.
    ///
    /// Stops on an empty page, a short page, `max_pages`, or any failed
    /// request. Partial accumulation is the contract: a mid-flight
    /// failure returns whatever was gathered so far.
    pub async fn paginated_request(&self, endpoint: &str, max_pages: usize) -> Vec<Value> {
        let mut all_items = Vec::new();

        for page in 1..=max_pages {
            let separator = if endpoint.contains('?') { '&' } else { '?' };
            let paged = format!("{}{}page={}&per_page={}", endpoint, separator, page, PER_PAGE);

            let items = match self.request(&paged).await {
                Ok(Value::Array(items)) => items,
                Ok(_) => {
                    tracing::warn!("Expected an array from {}, stopping pagination", endpoint);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Pagination of {} stopped at page {}: {}", endpoint, page, e);
                    break;
                }
            };

            if items.is_empty() {
                break;
            }

            let count = items.len();
            all_items.extend(items);

            if count < PER_PAGE {
                break;
            }
        }

        all_items
    }
}
