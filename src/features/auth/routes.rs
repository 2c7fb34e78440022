use axum::{routing::any, Router};

use crate::features::auth::handler;
use crate::shared::constants::UNAUTHORIZED_PATH;

/// Public auth routes (no authentication required)
pub fn public_routes() -> Router {
    Router::new().route(UNAUTHORIZED_PATH, any(handler::unauthorized))
}
