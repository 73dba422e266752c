use serde::Serialize;
use utoipa::ToSchema;

/// A badge computed deterministically from profile thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Achievement {
    pub name: String,
    pub icon: String,
    pub description: String,
}
