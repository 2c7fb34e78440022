use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::reports::models::{Report, ReportCategory};
use crate::shared::time::{format_long, format_relative};

/// One row of the admin dashboard table
#[derive(Debug, Clone, Serialize)]
pub struct DashboardRowDto {
    pub id: String,
    pub category_label: &'static str,
    pub category_color: &'static str,
    pub location: String,
    pub description: String,
    /// e.g. "5 minutes ago"
    pub submitted_relative: String,
    /// e.g. "May 1st, 2024 8:30 AM"
    pub submitted_long: String,
    /// Inline image source; only `data:image/` URIs are kept
    pub image_src: Option<String>,
}

impl DashboardRowDto {
    pub fn from_report(report: Report, now: DateTime<Utc>) -> Self {
        let category = ReportCategory::from_slug(&report.category);

        Self {
            id: report.id,
            category_label: category.label(),
            category_color: category.color(),
            location: report.location,
            description: report.description,
            submitted_relative: format_relative(report.submitted_at, now),
            submitted_long: format_long(report.submitted_at),
            image_src: report.image.filter(|uri| uri.starts_with("data:image/")),
        }
    }
}
