//! Backup and restore handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::super::types::{AppState, BackupResponse, RestoreResponse};
use crate::error_handling::ServiceError;
use crate::service;

pub async fn backup_handler(
    State(state): State<AppState>,
    table_name: Result<Path<String>, PathRejection>,
) -> Result<Json<BackupResponse>, ServiceError> {
    let Path(table_name) = table_name?;
    let summary = service::backup_table(&state.config, &table_name).await?;
    Ok(Json(BackupResponse {
        message: format!("Backup of {} completed successfully", summary.table),
        path: summary.container_path.display().to_string(),
        record_count: summary.record_count,
    }))
}

pub async fn restore_handler(
    State(state): State<AppState>,
    table_name: Result<Path<String>, PathRejection>,
) -> Result<Json<RestoreResponse>, ServiceError> {
    let Path(table_name) = table_name?;
    let summary = service::restore_table(&state.config, &table_name).await?;
    Ok(Json(RestoreResponse {
        message: format!("Table {} restored successfully", summary.table),
        rows_restored: summary.rows_restored,
    }))
}
