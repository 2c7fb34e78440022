use std::convert::Infallible;
use std::sync::Arc;

use axum::{extract::Request, http::StatusCode, response::Response, routing::get, Router};
use tower::{Layer, Service};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::middleware;
use crate::features::auth::{routes as auth_routes, CredentialVerifier};
use crate::features::reports::ReportService;
use crate::features::{admin, reports};

/// Build the application router (every route, no admin gate)
pub fn router(
    report_service: Arc<ReportService>,
    max_request_body_size: usize,
    cors_allowed_origins: Vec<String>,
) -> Router {
    // Simple health check endpoint
    async fn health_check() -> StatusCode {
        StatusCode::OK
    }

    Router::new()
        .merge(reports::routes(
            Arc::clone(&report_service),
            max_request_body_size,
        ))
        .merge(admin::routes(report_service))
        .merge(auth_routes::public_routes())
        .route("/health", get(health_check))
        .layer(middleware::cors_layer(cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

/// Wrap the router with the admin gate.
///
/// The gate sits outside the router so a rewritten URI is routed afresh.
pub fn with_admin_gate(
    router: Router,
    verifier: Arc<dyn CredentialVerifier>,
) -> impl Service<Request, Response = Response, Error = Infallible, Future = impl Send>
       + Clone
       + Send
       + 'static {
    axum::middleware::from_fn_with_state(verifier, middleware::admin_gate).layer(router)
}
