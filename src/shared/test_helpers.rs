use async_trait::async_trait;
use axum::Router;
use chrono::{TimeZone, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use std::sync::{Arc, Mutex};

use crate::features::auth::StaticCredentialVerifier;
use crate::features::reports::models::{CreateReport, Report, ReportCategory};
use crate::features::reports::services::{ReportService, ReportStore};
use crate::modules::storage::StoreError;

/// Report store kept entirely in memory
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    /// Snapshot of the stored collection
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn read_all(&self) -> Result<Vec<Report>, StoreError> {
        Ok(self.reports.lock().unwrap().clone())
    }

    async fn write_all(&self, reports: &[Report]) -> Result<(), StoreError> {
        *self.reports.lock().unwrap() = reports.to_vec();
        Ok(())
    }
}

/// `true` for eight uppercase hex characters
pub fn is_report_id(id: &str) -> bool {
    id.len() == 8 && id.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F'))
}

/// A draft that passes form validation
pub fn fake_draft() -> CreateReport {
    let number: String = BuildingNumber().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let category_index: usize = (0..ReportCategory::ALL.len()).fake();

    CreateReport {
        location: format!("{} {}, {}", number, street, city),
        category: ReportCategory::ALL[category_index].slug().to_string(),
        description: Sentence(8..12).fake(),
        image: None,
    }
}

pub fn sample_report(id: &str) -> Report {
    Report {
        id: id.to_string(),
        location: "123 Main St, corner of Oak".to_string(),
        category: "road_damage".to_string(),
        description: "Large pothole blocking the right lane near the school zone entrance."
            .to_string(),
        image: None,
        submitted_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
    }
}

pub const TEST_ADMIN_USERNAME: &str = "user";
pub const TEST_ADMIN_PASSWORD: &str = "password";

pub fn test_verifier() -> StaticCredentialVerifier {
    StaticCredentialVerifier::new(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD)
}

/// Report service over an in-memory store, plus the store for inspection
pub fn memory_service() -> (Arc<ReportService>, Arc<InMemoryReportStore>) {
    let store = Arc::new(InMemoryReportStore::default());
    (Arc::new(ReportService::new(store.clone())), store)
}

/// Application router (without the admin gate) over the given store
pub fn router_with_store(store: Arc<dyn ReportStore>) -> Router {
    let service = Arc::new(ReportService::new(store));
    crate::app::router(service, usize::MAX, vec!["*".to_string()])
}

/// Application router (without the admin gate) over an in-memory store
pub fn test_router() -> (Router, Arc<InMemoryReportStore>) {
    let store = Arc::new(InMemoryReportStore::default());
    (router_with_store(store.clone()), store)
}
