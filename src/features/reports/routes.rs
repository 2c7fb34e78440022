use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(report_service: Arc<ReportService>, max_request_body_size: usize) -> Router {
    Router::new()
        .route("/", get(handlers::show_form))
        .route(
            "/reports",
            post(handlers::submit_report).layer(DefaultBodyLimit::max(max_request_body_size)),
        )
        .route("/report/{id}", get(handlers::show_confirmation))
        .with_state(report_service)
}
