//! Upload and bulk insert handlers.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::super::types::{AppState, InsertResponse, UploadQuery, UploadResponse};
use crate::error_handling::ServiceError;
use crate::service;

/// Loads the named dataset's source file from the data directory
pub async fn upload_handler(
    State(state): State<AppState>,
    query: Result<Query<UploadQuery>, QueryRejection>,
) -> Result<Json<UploadResponse>, ServiceError> {
    let Query(query) = query?;
    let summary = service::upload_dataset(&state.config, &query.file_type).await?;
    Ok(Json(UploadResponse {
        message: format!("File {}.csv uploaded successfully", summary.dataset),
        rows_written: summary.rows_written,
    }))
}

/// Inserts a JSON array of `[id, name, hired_at, department_id, job_id]` rows
pub async fn insert_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InsertResponse>, ServiceError> {
    let records = service::parse_hired_payload(&body)?;
    let count = service::insert_hired_employees(&state.config, &records).await?;
    Ok(Json(InsertResponse {
        message: "Data inserted successfully".to_string(),
        count,
    }))
}
