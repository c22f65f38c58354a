//! Shareable links: every input, defaults filled in, as one query string.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::ScenarioParams;
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub query: String,
    pub scenario_path: String,
    pub params: ScenarioParams,
}

pub async fn get_share(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<Json<ShareResponse>, AppError> {
    // Only valid scenarios are worth sharing.
    state.evaluator.open(&params)?;

    let query = params
        .to_query_string()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ShareResponse {
        scenario_path: format!("/v1/scenario?{}", query),
        query,
        params,
    }))
}
