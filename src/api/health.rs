use crate::api::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "service": env!("CARGO_PKG_NAME")}))
}

/// Readiness plus the calculator settings requests will run with.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.evaluator.config();
    Json(serde_json::json!({
        "status": "ready",
        "openerMode": config.opener_mode,
        "solverTolerance": config.solver.tolerance,
        "solverMaxIterations": config.solver.max_iterations,
        "sweepSamples": config.sweep_samples,
    }))
}
