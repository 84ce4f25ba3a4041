//! HTTP front end.
//!
//! Every route is a thin adapter over `service`; failures are rendered as
//! `{"detail": ...}` with the status of their `ErrorKind`.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use handlers::{
    above_mean_handler, backup_handler, insert_handler, quarterly_handler, restore_handler,
    upload_handler,
};
pub use types::AppState;

/// Builds the application router over `config`.
///
/// Routes are served with and without a trailing slash.
pub fn router(config: Config) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/upload_csv", post(upload_handler))
        .route("/upload_csv/", post(upload_handler))
        .route("/insert_hired_employees", post(insert_handler))
        .route("/insert_hired_employees/", post(insert_handler))
        .route("/backup/:table_name", post(backup_handler))
        .route("/backup/:table_name/", post(backup_handler))
        .route("/restore/:table_name", post(restore_handler))
        .route("/restore/:table_name/", post(restore_handler))
        .route("/reports/quarterly_hires", get(quarterly_handler))
        .route("/reports/quarterly_hires/", get(quarterly_handler))
        .route("/reports/departments_above_mean", get(above_mean_handler))
        .route("/reports/departments_above_mean/", get(above_mean_handler))
        .with_state(state)
}

/// Binds `host:port` and serves the API until the process is stopped
pub async fn start_server(host: &str, port: u16, config: Config) -> Result<(), anyhow::Error> {
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", host, port, e))?;

    log::info!("Listening on http://{}:{}/", host, port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
