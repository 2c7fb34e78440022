use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::handlers as admin_handlers;
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::ReportCategory;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Admin
        admin_handlers::list_reports,
    ),
    components(
        schemas(
            Meta,
            ReportCategory,
            ReportResponseDto,
            ApiResponse<Vec<ReportResponseDto>>,
        )
    ),
    tags(
        (name = "admin", description = "Read access to submitted reports (basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicFix Admin API",
        version = "0.1.0",
        description = "Read-only API over community issue reports",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP Basic security scheme used by the admin gate
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
