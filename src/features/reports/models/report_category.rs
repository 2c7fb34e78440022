use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed catalogue of report categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    RoadDamage,
    Vandalism,
    PublicSafety,
    Garbage,
    Lighting,
    Other,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 6] = [
        ReportCategory::RoadDamage,
        ReportCategory::Vandalism,
        ReportCategory::PublicSafety,
        ReportCategory::Garbage,
        ReportCategory::Lighting,
        ReportCategory::Other,
    ];

    /// Resolve a stored slug, falling back to `Other` for anything unrecognized
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "road_damage" => ReportCategory::RoadDamage,
            "vandalism" => ReportCategory::Vandalism,
            "public_safety" => ReportCategory::PublicSafety,
            "garbage" => ReportCategory::Garbage,
            "lighting" => ReportCategory::Lighting,
            _ => ReportCategory::Other,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ReportCategory::RoadDamage => "road_damage",
            ReportCategory::Vandalism => "vandalism",
            ReportCategory::PublicSafety => "public_safety",
            ReportCategory::Garbage => "garbage",
            ReportCategory::Lighting => "lighting",
            ReportCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::RoadDamage => "Road Damage",
            ReportCategory::Vandalism => "Vandalism",
            ReportCategory::PublicSafety => "Public Safety",
            ReportCategory::Garbage => "Garbage & Waste",
            ReportCategory::Lighting => "Street Lighting",
            ReportCategory::Other => "Other",
        }
    }

    /// Badge colour used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            ReportCategory::RoadDamage => "#ef4444",
            ReportCategory::Vandalism => "#f97316",
            ReportCategory::PublicSafety => "#3b82f6",
            ReportCategory::Garbage => "#22c55e",
            ReportCategory::Lighting => "#eab308",
            ReportCategory::Other => "#6b7280",
        }
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}
