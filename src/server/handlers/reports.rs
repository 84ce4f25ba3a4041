//! Report handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, MessageResponse, ReportQuery};
use crate::error_handling::ServiceError;
use crate::service;

/// Hires per department and job, split by quarter
pub async fn quarterly_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let Query(query) = query?;
    let report = service::quarterly_hires(&state.config, query.year).await?;
    Ok(Json(report).into_response())
}

/// Departments hiring more than the mean; a message when none do
pub async fn above_mean_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let Query(query) = query?;
    let report = service::departments_above_mean(&state.config, query.year).await?;
    if report.is_empty() {
        return Ok(Json(MessageResponse {
            message: format!("No departments hired above the mean in {}", query.year),
        })
        .into_response());
    }
    Ok(Json(report).into_response())
}
