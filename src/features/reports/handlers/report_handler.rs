use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, HtmlError};
use crate::features::reports::dtos::{
    CategoryOptionDto, FormErrors, ImageUpload, ReportFormDto, ReportSubmission,
    DEFAULT_IMAGE_CONTENT_TYPE,
};
use crate::features::reports::services::ReportService;
use crate::shared::templates::render_page;

/// Render the report form page
pub async fn show_form() -> Result<Html<String>, HtmlError> {
    let html = render_form(&ReportFormDto::default(), &FormErrors::default(), false)?;
    Ok(Html(html))
}

/// Submit a new report
///
/// Accepts multipart/form-data with:
/// - `location`, `category`, `description`: text fields
/// - `image`: optional file; an empty file part counts as no image
///
/// Redirects to the confirmation page on success. Validation failures, uploads
/// over the body limit and storage failures re-render the form.
pub async fn submit_report(
    State(service): State<Arc<ReportService>>,
    multipart: Multipart,
) -> Result<Response, HtmlError> {
    let mut submission = ReportSubmission::default();

    if let Err(e) = read_submission(multipart, &mut submission).await {
        if e.status() != StatusCode::PAYLOAD_TOO_LARGE {
            return Err(multipart_error(e).into());
        }
        // Keep whatever text fields arrived before the limit was hit
        debug!("Report upload exceeded the body limit: {}", e);
        let html = render_form(&submission.form(), &FormErrors::image_too_large(), false)?;
        return Ok((StatusCode::PAYLOAD_TOO_LARGE, Html(html)).into_response());
    }

    let form = submission.form();

    if let Err(errors) = form.validate() {
        debug!("Report form rejected: {}", errors);
        let html = render_form(&form, &FormErrors::from(&errors), false)?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    match service.add_report(submission.into_create_report()).await {
        Ok(report) => Ok(Redirect::to(&format!("/report/{}", report.id)).into_response()),
        Err(e) => {
            tracing::error!("Report submission failed: {}", e);
            let html = render_form(&form, &FormErrors::default(), true)?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response())
        }
    }
}

/// Confirmation page for a submitted report
///
/// The id is shown as given; it is not looked up in the store.
pub async fn show_confirmation(Path(id): Path<String>) -> Result<Html<String>, HtmlError> {
    let html = render_page("confirmation.html", context! { report_id => id })?;
    Ok(Html(html))
}

fn render_form(
    form: &ReportFormDto,
    errors: &FormErrors,
    submission_failed: bool,
) -> Result<String, AppError> {
    let html = render_page(
        "home.html",
        context! {
            categories => CategoryOptionDto::all(),
            form => form,
            errors => errors,
            submission_failed => submission_failed,
        },
    )?;
    Ok(html)
}

async fn read_submission(
    mut multipart: Multipart,
    submission: &mut ReportSubmission,
) -> Result<(), MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "location" => submission.location = field.text().await?,
            "category" => submission.category = field.text().await?,
            "description" => submission.description = field.text().await?,
            "image" => {
                let content_type = field
                    .content_type()
                    .filter(|ct| !ct.is_empty())
                    .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
                    .to_string();

                let data = field.bytes().await?;

                // Browsers send an empty part when no file was chosen
                submission.image = if data.is_empty() {
                    None
                } else {
                    Some(ImageUpload {
                        content_type,
                        data: data.to_vec(),
                    })
                };
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
}
