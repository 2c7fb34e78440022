use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;

use crate::shared::constants::BASIC_AUTH_REALM;
use crate::shared::templates::render_page;

/// Placeholder that unauthenticated admin requests are rewritten to.
///
/// Answers 401 with a Basic challenge so browsers prompt for credentials.
pub async fn unauthorized() -> Response {
    let challenge = format!("Basic realm=\"{}\"", BASIC_AUTH_REALM);

    let body = match render_page("unauthorized.html", context! {}) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render unauthorized page: {:?}", e);
            "Authentication required".into_response()
        }
    };

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, challenge)],
        body,
    )
        .into_response()
}
