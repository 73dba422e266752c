use crate::{config::settings::Config, services::metrics::MetricsService};

#[derive(Clone)]
pub struct AppState {
    pub metrics: MetricsService,
    pub config: Config,
}
