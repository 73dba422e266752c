use anyhow::{Error, anyhow};
use dotenvy::dotenv;
use envy::from_env;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
    pub github_token: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u32,
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u32 {
    8000
}

fn default_cors_allowed_origins() -> String {
    "http://localhost:3000,http://localhost:5173".to_string()
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        from_env::<Self>().map_err(|e| anyhow!("Configuration error: {}", e))
    }
}
