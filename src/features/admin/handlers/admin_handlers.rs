use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use minijinja::context;
use utoipa::OpenApi;

use crate::core::error::{HtmlError, Result};
use crate::core::openapi::ApiDoc;
use crate::features::admin::dtos::DashboardRowDto;
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::services::ReportService;
use crate::shared::templates::render_page;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Render the admin dashboard listing every report, newest first
pub async fn dashboard(
    State(service): State<Arc<ReportService>>,
) -> std::result::Result<Html<String>, HtmlError> {
    let reports = service.get_all().await?;
    let now = Utc::now();

    let rows: Vec<DashboardRowDto> = reports
        .into_iter()
        .map(|r| DashboardRowDto::from_report(r, now))
        .collect();

    let html = render_page(
        "dashboard.html",
        context! {
            total => rows.len(),
            reports => rows,
        },
    )?;

    Ok(Html(html))
}

/// List all reports (paginated)
#[utoipa::path(
    get,
    path = "/admin/api/reports",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Reports, newest first", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Report storage unreadable")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.get_all().await?;
    let total = reports.len() as i64;

    let items: Vec<ReportResponseDto> = reports
        .into_iter()
        .skip(params.offset())
        .take(params.limit() as usize)
        .map(ReportResponseDto::from)
        .collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// OpenAPI document for the admin API
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::features::reports::services::{JsonFileReportStore, ReportStore};
    use crate::shared::test_helpers::{router_with_store, sample_report, test_router};

    #[tokio::test]
    async fn test_dashboard_empty_state() {
        let (router, _) = test_router();
        let server = TestServer::new(router).unwrap();

        let response = server.get("/admin").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("No reports have been submitted yet."));
        assert!(html.contains("0 Reports"));
    }

    #[tokio::test]
    async fn test_dashboard_lists_reports_newest_first() {
        let (router, store) = test_router();
        let mut older = sample_report("AAAA1111");
        older.description = "Older report about a broken street light.".to_string();
        let mut newer = sample_report("BBBB2222");
        newer.category = "potholes".to_string();
        newer.image = Some("data:image/png;base64,aGVsbG8=".to_string());
        store.write_all(&[newer, older]).await.unwrap();

        let server = TestServer::new(router).unwrap();
        let html = server.get("/admin").await.text();

        assert!(html.contains("2 Reports"));
        let newer_at = html.find("BBBB2222").unwrap();
        let older_at = html.find("AAAA1111").unwrap();
        assert!(newer_at < older_at);
        assert!(html.contains("Other"));
        assert!(html.contains("Image for Report #BBBB2222"));
        assert!(html.contains("<img src=\"data:image"));
    }

    #[tokio::test]
    async fn test_dashboard_storage_failure_is_generic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports.json");
        std::fs::write(&path, "[{\"broken\": ").unwrap();
        let server =
            TestServer::new(router_with_store(Arc::new(JsonFileReportStore::new(&path)))).unwrap();

        let response = server.get("/admin").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.text().contains(path.to_string_lossy().as_ref()));
    }

    #[tokio::test]
    async fn test_list_reports_json_with_pagination() {
        let (router, store) = test_router();
        let reports: Vec<_> = ["AAAA0001", "AAAA0002", "AAAA0003"]
            .into_iter()
            .map(sample_report)
            .collect();
        store.write_all(&reports).await.unwrap();

        let server = TestServer::new(router).unwrap();
        let response = server.get("/admin/api/reports?page=2&page_size=2").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 3);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["id"], "AAAA0003");
        assert_eq!(body["data"][0]["categoryLabel"], "Road Damage");
    }

    #[tokio::test]
    async fn test_list_reports_with_huge_page_is_empty() {
        let (router, store) = test_router();
        store.write_all(&[sample_report("AAAA0001")]).await.unwrap();

        let server = TestServer::new(router).unwrap();
        let response = server
            .get("/admin/api/reports?page=9223372036854775807&page_size=100")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_skips_non_image_data_uris() {
        let (router, store) = test_router();
        let mut report = sample_report("DDDD4444");
        report.image = Some("data:text/html;base64,PHNjcmlwdD4=".to_string());
        store.write_all(&[report]).await.unwrap();

        let server = TestServer::new(router).unwrap();
        let html = server.get("/admin").await.text();

        assert!(html.contains("DDDD4444"));
        assert!(!html.contains("Image for Report #DDDD4444"));
        assert!(!html.contains("PHNjcmlwdD4"));
    }

    #[tokio::test]
    async fn test_openapi_document_lists_admin_path() {
        let (router, _) = test_router();
        let server = TestServer::new(router).unwrap();

        let body: Value = server.get("/admin/api-docs/openapi.json").await.json();
        assert!(body["paths"]["/admin/api/reports"].is_object());
    }
}
