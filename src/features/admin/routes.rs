use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::reports::services::ReportService;

/// Create admin routes
///
/// Every path here sits under `/admin`, so the admin gate applies to all of them.
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/admin", get(handlers::dashboard))
        .route("/admin/api/reports", get(handlers::list_reports))
        .route("/admin/api-docs/openapi.json", get(handlers::openapi_json))
        .with_state(report_service)
}
