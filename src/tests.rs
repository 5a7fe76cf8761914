#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{
        init_test_tracing, setup_cached_app, setup_csv_app, setup_missing_file_app,
        setup_test_app, setup_week_app,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{DashboardView, KpiKind, Language, LocalizedTexts};
    use compute::testing::TWO_DAY_CSV;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn card(view: &DashboardView, kind: KpiKind) -> String {
        view.kpis.as_ref().unwrap().card(kind).unwrap().value.clone()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.data_source, "available");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_check_reports_missing_file() {
        let server = TestServer::new(setup_missing_file_app()).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "degraded");
        assert_eq!(body.data_source, "unavailable");
    }

    #[tokio::test]
    async fn test_dashboard_without_filter_uses_latest_day() {
        let _guard = init_test_tracing();
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/api/v1/dashboard").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<DashboardView> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Dashboard retrieved successfully");

        let view = body.data;
        assert_eq!(view.language, Language::Zh);
        assert_eq!(view.range, None);
        assert_eq!(view.as_of, Some(date(3, 2)));
        assert_eq!(view.as_of_note.as_deref(), Some("以下数据为2025-03-02的数据"));
        assert_eq!(view.records.len(), 2);

        assert_eq!(card(&view, KpiKind::TotalPackages), "200");
        assert_eq!(card(&view, KpiKind::ErrorRate), "5.000");
        assert_eq!(card(&view, KpiKind::TotalHours), "12.00");
        assert_eq!(card(&view, KpiKind::Efficiency), "16.67");
        assert_eq!(card(&view, KpiKind::MachineSorted), "150");
    }

    #[tokio::test]
    async fn test_dashboard_filtered_to_single_day() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("lang", "en")
            .add_query_param("start_date", "2025-03-01")
            .add_query_param("end_date", "2025-03-01")
            .await;

        response.assert_status(StatusCode::OK);
        let view = response.json::<ApiResponse<DashboardView>>().data;
        assert_eq!(view.language, Language::En);
        assert_eq!(view.as_of, Some(date(3, 1)));
        assert_eq!(view.as_of_note.as_deref(), Some("Data as of 2025-03-01"));
        assert_eq!(card(&view, KpiKind::TotalPackages), "100");
        assert_eq!(card(&view, KpiKind::Efficiency), "12.50");

        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].manual_sorted, 40);
        for panel in &view.chart.panels {
            for series in &panel.series {
                assert_eq!(series.x, vec![date(3, 1)]);
            }
        }
        assert_eq!(view.available_range.unwrap().end, date(3, 2));
    }

    #[tokio::test]
    async fn test_dashboard_filter_over_unsorted_week() {
        let server = TestServer::new(setup_week_app()).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("start_date", "2025-03-02")
            .add_query_param("end_date", "2025-03-04")
            .await;

        response.assert_status(StatusCode::OK);
        let view = response.json::<ApiResponse<DashboardView>>().data;
        let dates: Vec<NaiveDate> = view.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(3, 2), date(3, 4), date(3, 3)]);
        assert_eq!(view.as_of, Some(date(3, 4)));
        assert_eq!(card(&view, KpiKind::TotalPackages), "11,980");
        assert_eq!(card(&view, KpiKind::TotalHours), "63.50");
    }

    #[tokio::test]
    async fn test_dashboard_whole_week_kpis() {
        let server = TestServer::new(setup_week_app()).unwrap();

        let view = server
            .get("/api/v1/dashboard")
            .await
            .json::<ApiResponse<DashboardView>>()
            .data;

        assert_eq!(view.as_of, Some(date(3, 7)));
        assert_eq!(card(&view, KpiKind::TotalPackages), "15,045");
        assert_eq!(card(&view, KpiKind::ErrorRate), "0.253");
        assert_eq!(card(&view, KpiKind::TotalHours), "75.50");
        assert_eq!(card(&view, KpiKind::Efficiency), "199.27");
        assert_eq!(card(&view, KpiKind::MachineSorted), "12,100");
    }

    #[tokio::test]
    async fn test_dashboard_empty_range() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("start_date", "2025-04-01")
            .add_query_param("end_date", "2025-04-30")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<DashboardView> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "No data in the selected date range");
        assert!(body.data.kpis.is_none());
        assert!(body.data.as_of.is_none());
        assert!(body.data.records.is_empty());
        assert!(body.data.chart.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_rejects_inverted_range() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("start_date", "2025-03-02")
            .add_query_param("end_date", "2025-03-01")
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_malformed_date() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("start_date", "March 1st")
            .add_query_param("end_date", "2025-03-02")
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_single_endpoint_is_ignored() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let view = server
            .get("/api/v1/dashboard")
            .add_query_param("start_date", "2025-03-02")
            .add_query_param("end_date", "")
            .await
            .json::<ApiResponse<DashboardView>>()
            .data;

        assert_eq!(view.range, None);
        assert_eq!(view.records.len(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_missing_file_is_server_error() {
        let server = TestServer::new(setup_missing_file_app()).unwrap();

        let response = server.get("/api/v1/dashboard").expect_failure().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "DATA_SOURCE_ERROR");
    }

    #[tokio::test]
    async fn test_dashboard_malformed_table_is_server_error() {
        let csv = "\
日期,总集包票数,错分票数,分拣机分拣量,JOY工时,DELIN工时,RAPID工时,MB工时,PR工时
2025/03/01,100,2,60,2,2,2,2,5
";
        let server = TestServer::new(setup_csv_app(csv)).unwrap();

        let response = server.get("/api/v1/dashboard").expect_failure().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "DATA_SOURCE_ERROR");
        assert!(body.error.contains("2025/03/01"));
    }

    #[tokio::test]
    async fn test_cached_app_uses_configured_default_language() {
        let server = TestServer::new(setup_cached_app()).unwrap();

        let first = server.get("/api/v1/dashboard").await;
        let second = server.get("/api/v1/dashboard").await;

        first.assert_status(StatusCode::OK);
        let first = first.json::<ApiResponse<DashboardView>>().data;
        let second = second.json::<ApiResponse<DashboardView>>().data;
        assert_eq!(first.language, Language::En);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_texts_for_each_language() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let zh: ApiResponse<LocalizedTexts> = server.get("/api/v1/texts").await.json();
        let en: ApiResponse<LocalizedTexts> = server
            .get("/api/v1/texts")
            .add_query_param("lang", "en")
            .await
            .json();

        assert_eq!(zh.data.language, Language::Zh);
        assert_eq!(en.data.language, Language::En);
        assert_eq!(zh.data.entries.len(), en.data.entries.len());
        assert_eq!(en.data.entries["kpi1"], "Total Packages");
        assert_eq!(zh.data.entries["kpi1"], "总集包票数");
    }

    #[tokio::test]
    async fn test_texts_unknown_language_falls_back() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let body: ApiResponse<LocalizedTexts> = server
            .get("/api/v1/texts")
            .add_query_param("lang", "fr")
            .await
            .json();

        assert_eq!(body.data.language, Language::Zh);
    }

    #[tokio::test]
    async fn test_page_renders_in_default_language() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let page = response.text();
        let texts = Language::Zh.texts();
        assert!(page.contains(texts.title));
        assert!(page.contains(texts.filter_title));
        assert!(page.contains(texts.toggle_label));
        assert!(page.contains("以下数据为2025-03-02的数据"));
        assert!(page.contains(r#"name="lang" value="en""#));
        assert!(page.contains(r#"id="chart""#));
    }

    #[tokio::test]
    async fn test_page_toggle_swaps_labels() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let page = server
            .get("/")
            .add_query_param("lang", "en")
            .add_query_param("start_date", "2025-03-01")
            .add_query_param("end_date", "2025-03-01")
            .await
            .text();

        let en = Language::En.texts();
        let zh = Language::Zh.texts();
        assert!(page.contains(en.title));
        assert!(page.contains(en.data_title));
        assert!(!page.contains(zh.data_title));
        assert!(page.contains("Data as of 2025-03-01"));
        assert!(page.contains(r#"name="lang" value="zh""#));
        assert!(page.contains(r#"name="start_date" value="2025-03-01""#));
    }

    #[tokio::test]
    async fn test_page_empty_range_shows_notice() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/")
            .add_query_param("lang", "en")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-01-31")
            .await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains(Language::En.texts().no_data));
    }

    #[tokio::test]
    async fn test_page_inverted_range_renders_error_page() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/")
            .add_query_param("start_date", "2025-03-02")
            .add_query_param("end_date", "2025-03-01")
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("<h1>400 Bad Request</h1>"));
    }

    #[tokio::test]
    async fn test_page_malformed_date_renders_error_page() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/")
            .add_query_param("start_date", "March 1st")
            .add_query_param("end_date", "2025-03-02")
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let page = response.text();
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("<h1>400 Bad Request</h1>"));
    }

    #[tokio::test]
    async fn test_page_header_only_file_shows_notice() {
        let header = TWO_DAY_CSV.lines().next().unwrap();
        let server = TestServer::new(setup_csv_app(&format!("{}\n", header))).unwrap();

        let response = server.get("/").add_query_param("lang", "en").await;

        response.assert_status(StatusCode::OK);
        let page = response.text();
        assert!(page.contains(Language::En.texts().no_data));
        assert!(!page.contains("<td>"));
    }

    #[tokio::test]
    async fn test_dashboard_header_only_file_is_empty_view() {
        let header = TWO_DAY_CSV.lines().next().unwrap();
        let server = TestServer::new(setup_csv_app(&format!("{}\n", header))).unwrap();

        let response = server.get("/api/v1/dashboard").await;

        response.assert_status(StatusCode::OK);
        let view = response.json::<ApiResponse<DashboardView>>().data;
        assert!(view.kpis.is_none());
        assert!(view.available_range.is_none());
        assert!(view.records.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_fractional_count_is_server_error() {
        let csv = "\
日期,总集包票数,错分票数,分拣机分拣量,JOY工时,DELIN工时,RAPID工时,MB工时,PR工时
03月01日,100.7,2,60,2,2,2,2,5
";
        let server = TestServer::new(setup_csv_app(csv)).unwrap();

        let response = server.get("/api/v1/dashboard").expect_failure().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "DATA_SOURCE_ERROR");
        assert!(body.error.contains("总集包票数"));
    }

    #[tokio::test]
    async fn test_page_missing_file_renders_error_page() {
        let server = TestServer::new(setup_missing_file_app()).unwrap();

        let response = server.get("/").expect_failure().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("<!DOCTYPE html>"));
    }
}
