pub mod achievements;
pub mod github;
pub mod metrics;
