use async_trait::async_trait;
use std::path::PathBuf;

use crate::features::reports::models::Report;
use crate::modules::storage::{JsonDocument, StoreError};

/// Durable collection storage with whole-collection read and write.
///
/// Implementations provide no isolation between concurrent callers; the
/// report service serializes its read-modify-write cycles on top of this.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Load every report, newest first. A missing backing store is
    /// initialized empty rather than reported as an error.
    async fn read_all(&self) -> Result<Vec<Report>, StoreError>;

    /// Replace the entire stored collection with `reports`
    async fn write_all(&self, reports: &[Report]) -> Result<(), StoreError>;
}

/// Report store backed by a single JSON array on disk
pub struct JsonFileReportStore {
    document: JsonDocument,
}

impl JsonFileReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.document.path()
    }
}

#[async_trait]
impl ReportStore for JsonFileReportStore {
    async fn read_all(&self) -> Result<Vec<Report>, StoreError> {
        if let Some(reports) = self.document.load::<Vec<Report>>().await? {
            return Ok(reports);
        }

        if self.document.create_if_absent(&Vec::<Report>::new()).await? {
            return Ok(Vec::new());
        }

        // Someone else created the document between our read and create
        Ok(self
            .document
            .load::<Vec<Report>>()
            .await?
            .unwrap_or_default())
    }

    async fn write_all(&self, reports: &[Report]) -> Result<(), StoreError> {
        self.document.save(&reports).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_report;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_all_initializes_missing_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data/reports.json");
        let store = JsonFileReportStore::new(&path);

        let reports = store.read_all().await.unwrap();

        assert!(reports.is_empty());
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_read_all_is_idempotent_and_keeps_data() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileReportStore::new(dir.path().join("reports.json"));

        assert!(store.read_all().await.unwrap().is_empty());
        assert!(store.read_all().await.unwrap().is_empty());

        let reports = vec![sample_report("AAAA1111")];
        store.write_all(&reports).await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), reports);
        assert_eq!(store.read_all().await.unwrap(), reports);
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileReportStore::new(dir.path().join("reports.json"));

        let mut with_image = sample_report("BBBB2222");
        with_image.image = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        let reports = vec![with_image, sample_report("CCCC3333")];

        store.write_all(&reports).await.unwrap();
        assert_eq!(store.read_all().await.unwrap(), reports);
    }

    #[tokio::test]
    async fn test_write_all_replaces_instead_of_appending() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileReportStore::new(dir.path().join("reports.json"));

        store
            .write_all(&[sample_report("AAAA1111"), sample_report("BBBB2222")])
            .await
            .unwrap();
        store.write_all(&[sample_report("CCCC3333")]).await.unwrap();

        let ids: Vec<String> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["CCCC3333"]);
    }

    #[tokio::test]
    async fn test_corrupt_document_propagates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        let store = JsonFileReportStore::new(&path);
        let result = store.read_all().await;

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        // The corrupt file must not be reset
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"not": "an array"}"#
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_reads_all_see_empty_collection() {
        for _ in 0..50 {
            let dir = TempDir::new().unwrap();
            let store = std::sync::Arc::new(JsonFileReportStore::new(
                dir.path().join("reports.json"),
            ));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    tokio::spawn(async move { store.read_all().await })
                })
                .collect();

            for handle in handles {
                let reports = handle.await.unwrap().unwrap();
                assert!(reports.is_empty());
            }
        }
    }
}
