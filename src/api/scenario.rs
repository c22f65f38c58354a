//! Scenario endpoints: open, deep-dive close, thresholds and the full report.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::config::OpenerMode;
use crate::domain::{OpenResult, ScenarioParams};
use crate::error::AppError;
use crate::orchestration::{DeepDive, ScenarioReport, Thresholds};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenResponse {
    pub mode: OpenerMode,
    #[serde(flatten)]
    pub open: OpenResult,
    pub interest: f64,
    pub total_fees: f64,
    pub leverage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    #[serde(flatten)]
    pub report: ScenarioReport,
    pub share_query: String,
}

pub async fn get_open(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<Json<OpenResponse>, AppError> {
    let scenario = state.evaluator.open(&params)?;

    Ok(Json(OpenResponse {
        mode: scenario.mode,
        open: scenario.open,
        interest: scenario.open.interest(),
        total_fees: scenario.open.total_fees(),
        leverage: scenario.leverage(),
    }))
}

pub async fn get_close(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<Json<DeepDive>, AppError> {
    let scenario = state.evaluator.open(&params)?;
    Ok(Json(scenario.deep_dive()?))
}

pub async fn get_thresholds(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<Json<Thresholds>, AppError> {
    let scenario = state.evaluator.open(&params)?;
    Ok(Json(state.evaluator.thresholds(&scenario)?))
}

pub async fn get_scenario(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<Json<ScenarioResponse>, AppError> {
    let report = state.evaluator.evaluate(&params)?;
    let share_query = params
        .to_query_string()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ScenarioResponse {
        report,
        share_query,
    }))
}
