use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::ScenarioParams;
use crate::engine::SweepPoint;
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub collateral_token: String,
    pub loan_token: String,
    pub points: Vec<SweepPoint>,
}

pub async fn get_sweep(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<Json<SweepResponse>, AppError> {
    let scenario = state.evaluator.open(&params)?;
    let points = state.evaluator.sweep(&scenario)?.collect();

    Ok(Json(SweepResponse {
        collateral_token: params.collateral_token,
        loan_token: params.loan_token,
        points,
    }))
}

pub async fn get_sweep_csv(
    Query(params): Query<ScenarioParams>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let scenario = state.evaluator.open(&params)?;
    let body = encode_csv(state.evaluator.sweep(&scenario)?)?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body))
}

/// One CSV line per sample; header row included.
pub fn encode_csv<I>(points: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator<Item = SweepPoint>,
{
    #[derive(Debug, Serialize)]
    struct Row {
        price_change_pct: f64,
        roi_pct: f64,
        hold_roi_pct: f64,
        rational_to_repay: bool,
        outperforms_hold: bool,
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    for point in points {
        writer.serialize(Row {
            price_change_pct: point.price_change_pct,
            roi_pct: point.roi_pct,
            hold_roi_pct: point.hold_roi_pct,
            rational_to_repay: point.rational_to_repay,
            outperforms_hold: point.outperforms_hold(),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
