use axum::{
    extract::{Request, State},
    http::{header, uri::PathAndQuery, HeaderValue, Uri},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::features::auth::{parse_basic_auth, CredentialVerifier};
use crate::shared::constants::{ADMIN_PATH_PREFIX, UNAUTHORIZED_PATH};

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Basic-auth gate for the admin area.
///
/// Requests under `/admin` without valid credentials are rewritten to the
/// unauthorized route before routing, so the admin handlers never run.
/// Everything else passes through untouched. Must wrap the whole router
/// (not be added with `Router::layer`) for the rewrite to affect routing.
pub async fn admin_gate(
    State(verifier): State<Arc<dyn CredentialVerifier>>,
    mut req: Request,
    next: Next,
) -> Response {
    if !req.uri().path().starts_with(ADMIN_PATH_PREFIX) {
        return next.run(req).await;
    }

    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_basic_auth)
        .map(|creds| verifier.verify(&creds.username, &creds.password))
        .unwrap_or(false);

    if authorized {
        return next.run(req).await;
    }

    tracing::warn!(path = %req.uri().path(), "Admin request rejected");
    *req.uri_mut() = unauthorized_uri(req.uri());
    next.run(req).await
}

/// Same request target with the path swapped for the unauthorized route
fn unauthorized_uri(original: &Uri) -> Uri {
    let path_and_query = match original.query() {
        Some(query) => format!("{}?{}", UNAUTHORIZED_PATH, query),
        None => UNAUTHORIZED_PATH.to_string(),
    };

    let mut parts = original.clone().into_parts();
    parts.path_and_query = PathAndQuery::try_from(path_and_query)
        .ok()
        .or_else(|| Some(PathAndQuery::from_static(UNAUTHORIZED_PATH)));

    Uri::from_parts(parts).unwrap_or_else(|_| Uri::from_static(UNAUTHORIZED_PATH))
}
