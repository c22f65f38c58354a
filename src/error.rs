use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the calculator core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// An input lies outside the domain the formulas are defined on.
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    /// A numerical solve did not meet its tolerance within the iteration cap.
    #[error("{solver} did not converge after {iterations} iterations")]
    SolverNonConvergence {
        solver: &'static str,
        iterations: u32,
    },
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn non_convergence(solver: &'static str, iterations: u32) -> Self {
        CalcError::SolverNonConvergence { solver, iterations }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::InvalidParameter { .. } => AppError::BadRequest(err.to_string()),
            CalcError::SolverNonConvergence { .. } => AppError::Unprocessable(err.to_string()),
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
