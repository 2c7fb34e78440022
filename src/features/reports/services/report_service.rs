use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::services::ReportStore;

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    /// Serializes read-modify-write cycles against the store
    write_lock: Mutex<()>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a new report and prepend it to the stored collection.
    ///
    /// The id and submission time are assigned here, never by the caller.
    pub async fn add_report(&self, data: CreateReport) -> Result<Report> {
        let _guard = self.write_lock.lock().await;

        let mut reports = self.store.read_all().await.map_err(|e| {
            tracing::error!("Failed to read reports: {:?}", e);
            AppError::Storage(e)
        })?;

        let report = Report {
            id: generate_report_id(),
            location: data.location,
            category: data.category,
            description: data.description,
            image: data.image,
            submitted_at: Utc::now(),
        };

        reports.insert(0, report.clone());

        self.store.write_all(&reports).await.map_err(|e| {
            tracing::error!("Failed to write reports: {:?}", e);
            AppError::Storage(e)
        })?;

        tracing::info!(
            report_id = %report.id,
            category = %report.category,
            has_image = report.image.is_some(),
            total = reports.len(),
            "Created report"
        );

        Ok(report)
    }

    /// List all reports, newest first
    pub async fn get_all(&self) -> Result<Vec<Report>> {
        self.store.read_all().await.map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Storage(e)
        })
    }
}

/// Generate a short report id: the first segment of a random UUIDv4, uppercased.
///
/// This is 8 hex characters (32 bits), so uniqueness is probabilistic only.
pub fn generate_report_id() -> String {
    let uuid = Uuid::new_v4().to_string();
    uuid.split('-').next().unwrap_or(&uuid).to_uppercase()
}
