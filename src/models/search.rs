use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::repository::{RepoDetail, RepoSummary};

/// Raw search payload from the upstream API.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RepoDetail>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SearchResults {
    pub total_count: u64,
    pub items: Vec<RepoSummary>,
}

impl From<SearchResponse> for SearchResults {
    fn from(value: SearchResponse) -> Self {
        Self {
            total_count: value.total_count,
            items: value.items.into_iter().map(RepoSummary::from).collect(),
        }
    }
}
