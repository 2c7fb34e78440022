//! Server-rendered page templates.

pub mod engine;

pub use engine::{render_page, TemplateError};
