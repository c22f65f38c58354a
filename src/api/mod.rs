pub mod health;
pub mod scenario;
pub mod share;
pub mod sweep;

use crate::config::Config;
use crate::orchestration::ScenarioEvaluator;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<ScenarioEvaluator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            evaluator: Arc::new(ScenarioEvaluator::new(config)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/open", get(scenario::get_open))
        .route("/v1/close", get(scenario::get_close))
        .route("/v1/thresholds", get(scenario::get_thresholds))
        .route("/v1/scenario", get(scenario::get_scenario))
        .route("/v1/sweep", get(sweep::get_sweep))
        .route("/v1/sweep.csv", get(sweep::get_sweep_csv))
        .route("/v1/share", get(share::get_share))
        .layer(cors)
        .with_state(state)
}
