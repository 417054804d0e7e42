use crate::{error::AppError, AppState};
use analytics::{AnalystDetail, Dashboard, DashboardQuery, DashboardReport};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub top_n: Option<usize>,
    /// Recent plays cap; `0` lists every play in the window.
    pub recent: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// # GET /api/dashboard
/// Overall, cohort and per-analyst statistics plus recent plays for a window.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardReport>, AppError> {
    let records = state.provider.load().await?;
    let recent = params.recent.unwrap_or(state.dashboard.recent_limit);
    let query = DashboardQuery {
        start: params.start,
        end: params.end,
        top_n: params.top_n.unwrap_or(state.dashboard.top_n),
        recent_limit: (recent > 0).then_some(recent),
        policy: state.dashboard.win_rate_policy,
    };
    let report = Dashboard::build(&records, &query)?;
    Ok(Json(report))
}

/// # GET /api/analysts
/// Every analyst in the history, in first-seen order.
pub async fn get_analysts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    let records = state.provider.load().await?;
    Ok(Json(analytics::dashboard::members(&records)))
}

/// # GET /api/analysts/:member
/// One analyst's statistics and plays within a window.
pub async fn get_analyst_detail(
    State(state): State<Arc<AppState>>,
    Path(member): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<Json<AnalystDetail>, AppError> {
    let records = state.provider.load().await?;
    let detail = Dashboard::analyst_detail(
        &records,
        &member,
        params.start,
        params.end,
        state.dashboard.win_rate_policy,
    )?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use crate::{router, AppState};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use configuration::DashboardConfig;
    use core_types::{PlayRecord, PlayResult};
    use loader::{LoaderError, RecordProvider, StaticProvider};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OfflineProvider;

    #[async_trait]
    impl RecordProvider for OfflineProvider {
        async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
            Err(LoaderError::SourceUnavailable("top_plays.csv not found".to_string()))
        }

        fn describe(&self) -> String {
            "offline".to_string()
        }
    }

    fn play(member: &str, day: u32, result: PlayResult, out: Decimal, inn: Decimal) -> PlayRecord {
        PlayRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            play: format!("{member} pick"),
            odds: "-110".to_string(),
            member: member.to_string(),
            result,
            units_out: out,
            units_in: inn,
        }
    }

    fn state_with(provider: Arc<dyn RecordProvider>) -> Arc<AppState> {
        Arc::new(AppState {
            provider,
            dashboard: DashboardConfig::default(),
        })
    }

    fn fixture() -> Arc<AppState> {
        state_with(Arc::new(StaticProvider::new(vec![
            play("Dana", 1, PlayResult::Win, dec!(1), dec!(2)),
            play("Riley", 2, PlayResult::Loss, dec!(1), dec!(0)),
            play("Dana", 3, PlayResult::Push, dec!(1), dec!(1)),
        ])))
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn dashboard_reports_overall_stats() {
        let (status, body) = get(fixture(), "/api/dashboard?top_n=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overall"]["total"], 3);
        assert_eq!(body["overall"]["wins"], 1);
        assert_eq!(body["cohort"]["members"], serde_json::json!(["Dana"]));
        assert_eq!(body["analysts"][0]["member"], "Dana");
        assert_eq!(body["recent_plays"][0]["date"], "2025-03-03");
    }

    #[tokio::test]
    async fn dashboard_applies_date_window() {
        let (status, body) = get(fixture(), "/api/dashboard?start=2025-03-02&end=2025-03-02").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overall"]["total"], 1);
        assert_eq!(body["overall"]["losses"], 1);
    }

    #[tokio::test]
    async fn inverted_window_is_bad_request() {
        let (status, body) = get(fixture(), "/api/dashboard?start=2025-03-03&end=2025-03-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid date range"));
    }

    #[tokio::test]
    async fn lists_analysts_in_first_seen_order() {
        let (status, body) = get(fixture(), "/api/analysts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["Dana", "Riley"]));
    }

    #[tokio::test]
    async fn analyst_detail_and_unknown_analyst() {
        let (status, body) = get(fixture(), "/api/analysts/Dana").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["total"], 2);
        assert_eq!(body["plays"][0]["result"], "P");

        let (status, _) = get(fixture(), "/api/analysts/Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unavailable_source_is_service_unavailable() {
        let (status, body) = get(state_with(Arc::new(OfflineProvider)), "/api/dashboard").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("top_plays.csv"));
    }
}
