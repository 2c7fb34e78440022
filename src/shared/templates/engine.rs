//! Template engine for server-rendered pages using Jinja2 syntax.
//!
//! Page templates live in `templates/pages/` and are compiled into the binary,
//! so rendering never depends on the working directory.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Page templates as (name, source)
const PAGE_TEMPLATES: &[(&str, &str)] = &[
    (
        "layout.html",
        include_str!("../../../templates/pages/layout.html.jinja"),
    ),
    (
        "home.html",
        include_str!("../../../templates/pages/home.html.jinja"),
    ),
    (
        "confirmation.html",
        include_str!("../../../templates/pages/confirmation.html.jinja"),
    ),
    (
        "dashboard.html",
        include_str!("../../../templates/pages/dashboard.html.jinja"),
    ),
    (
        "unauthorized.html",
        include_str!("../../../templates/pages/unauthorized.html.jinja"),
    ),
    (
        "error.html",
        include_str!("../../../templates/pages/error.html.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Every page is HTML regardless of its name
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for (name, source) in PAGE_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context.
///
/// # Example
/// ```ignore
/// let html = render_page("confirmation.html", minijinja::context! { report_id => "1A2B3C4D" })?;
/// ```
pub fn render_page<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[allow(dead_code)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}
