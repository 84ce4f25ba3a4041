//! HTTP server data structures.

use std::sync::Arc;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::{Config, REPORT_YEAR};
use crate::error_handling::ServiceError;

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Query string of `POST /upload_csv/`
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_type: String,
}

/// Query string of the report endpoints
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_year() -> i32 {
    REPORT_YEAR
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub rows_written: usize,
}

#[derive(Serialize)]
pub struct InsertResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct BackupResponse {
    pub message: String,
    pub path: String,
    pub record_count: usize,
}

#[derive(Serialize)]
pub struct RestoreResponse {
    pub message: String,
    pub rows_restored: usize,
}

/// Body of an informational reply with no data attached
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every error reply
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            detail: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}
