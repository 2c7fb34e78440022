use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::features::reports::models::{CreateReport, Report, ReportCategory};

/// Shown next to the image field when the upload is too big
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "Max file size is 5MB.";

/// Content type assumed when an upload does not declare one
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// Image part of a submission, held fully in memory
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Raw report submission as read from the multipart form
#[derive(Debug, Clone, Default)]
pub struct ReportSubmission {
    pub location: String,
    pub category: String,
    pub description: String,
    /// `None` when no file was attached or the file part was empty
    pub image: Option<ImageUpload>,
}

impl ReportSubmission {
    /// Form view of the submission for presentation-boundary validation
    pub fn form(&self) -> ReportFormDto {
        ReportFormDto {
            location: self.location.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            image_size: self.image.as_ref().map(|image| image.data.len()),
        }
    }

    /// Adapt into the draft the report service expects, encoding any image
    /// as a data URI. No size limit applies at this step.
    pub fn into_create_report(self) -> CreateReport {
        CreateReport {
            location: self.location,
            category: self.category,
            description: self.description,
            image: self
                .image
                .map(|image| encode_data_uri(&image.content_type, &image.data)),
        }
    }
}

/// Encode bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_uri(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64_STANDARD.encode(data))
}

/// Report form fields with the rules shown to the citizen
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ReportFormDto {
    #[validate(length(
        min = 10,
        message = "Please provide a specific address or intersection."
    ))]
    pub location: String,

    #[validate(length(min = 1, message = "Please select a category."))]
    pub category: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    #[serde(skip)]
    #[validate(range(max = 5_000_000, message = "Max file size is 5MB."))]
    pub image_size: Option<usize>,
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let length = description.chars().count();
    if length < 20 {
        return Err(ValidationError::new("length")
            .with_message("Description must be at least 20 characters.".into()));
    }
    if length > 500 {
        return Err(ValidationError::new("length")
            .with_message("Description must be 500 characters or less.".into()));
    }
    Ok(())
}

/// First error message per form field, keyed by field name
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormErrors(pub BTreeMap<String, String>);

impl FormErrors {
    /// Errors for an upload cut off by the request body limit, before the
    /// form could be validated
    pub fn image_too_large() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("image".to_string(), IMAGE_TOO_LARGE_MESSAGE.to_string());
        FormErrors(fields)
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let message = errs.first().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field))
                })?;
                let field = match &*field {
                    "image_size" => "image".to_string(),
                    other => other.to_string(),
                };
                Some((field, message))
            })
            .collect();

        FormErrors(fields)
    }
}

/// Category option rendered in the form's select box
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOptionDto {
    pub value: &'static str,
    pub label: &'static str,
}

impl CategoryOptionDto {
    pub fn all() -> Vec<CategoryOptionDto> {
        ReportCategory::ALL
            .iter()
            .map(|c| CategoryOptionDto {
                value: c.slug(),
                label: c.label(),
            })
            .collect()
    }
}

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    /// Eight uppercase hex characters
    #[schema(example = "1A2B3C4D")]
    pub id: String,
    pub location: String,
    /// Category slug as submitted
    #[schema(example = "road_damage")]
    pub category: String,
    /// Display label; unknown slugs resolve to "Other"
    #[schema(example = "Road Damage")]
    pub category_label: String,
    pub description: String,
    /// Base64 data URI of the attached image
    pub image: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            category_label: ReportCategory::from_slug(&r.category).label().to_string(),
            id: r.id,
            location: r.location,
            category: r.category,
            description: r.description,
            image: r.image,
            submitted_at: r.submitted_at,
        }
    }
}
