//! HTTP routes for the dashboard service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::heatmap::{HeatmapCell, HeatmapView, Metric};
use crate::state::{reduce, HeatmapEvent, LoadPhase};
use crate::templates::{catalog, Instantiator, Template};
use crate::DashboardState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// Heatmap render for one batch and metric.
#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub metric: Metric,
    pub cells: Vec<HeatmapCell>,
    pub count: usize,
    /// True when the upstream reported the fetch as degraded; the cells are
    /// whatever arrived and the shell should surface a notice.
    pub degraded: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub metric: Metric,
    pub phase: String,
    pub latest_seq: u64,
    pub record_count: usize,
}

/// A template hit decorated with its category style.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub category_icon: &'static str,
    pub category_color: &'static str,
    pub criteria: serde_json::Value,
    pub is_public: bool,
}

impl From<&Template> for TemplateView {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            description: t.description.clone(),
            category: t.category.clone(),
            category_icon: catalog::category_icon(&t.category),
            category_color: catalog::category_color(&t.category),
            criteria: t.criteria.clone(),
            is_public: t.is_public,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateView>,
    pub count: usize,
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    /// Metric to color by; defaults to the currently selected one
    pub metric: Option<Metric>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    /// Free-text search term; empty or absent matches everything
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFromTemplateRequest {
    pub template_id: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "marketboard".to_string(),
    })
}

/// Render the heatmap for the requested (or currently selected) metric.
///
/// Issues a fresh fetch under a new sequence number and publishes its
/// resolution through the reducer; an overtaken fetch still answers its own
/// caller but never overwrites newer published state.
pub async fn get_heatmap(
    State(state): State<Arc<DashboardState>>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<HeatmapResponse>, StatusCode> {
    let (metric, seq) = {
        let mut heatmap = state.heatmap.write().await;
        let metric = query.metric.unwrap_or(heatmap.metric);
        let next = reduce(&heatmap, HeatmapEvent::MetricSelected(metric));
        *heatmap = next;
        (metric, heatmap.latest_seq)
    };

    let batch = match state.provider.fetch_stocks(state.config.data.fetch_limit).await {
        Ok(batch) => batch,
        Err(e) => {
            warn!(error = %e, "Stock fetch failed");
            let mut heatmap = state.heatmap.write().await;
            let next = reduce(
                &heatmap,
                HeatmapEvent::FetchFailed {
                    seq,
                    message: e.to_string(),
                },
            );
            *heatmap = next;
            return Err(StatusCode::BAD_GATEWAY);
        }
    };

    {
        let mut heatmap = state.heatmap.write().await;
        let next = reduce(
            &heatmap,
            HeatmapEvent::FetchResolved {
                seq,
                batch: batch.clone(),
            },
        );
        *heatmap = next;
    }

    let view = HeatmapView::build(&batch.data, metric);
    Ok(Json(HeatmapResponse {
        metric,
        count: view.cells.len(),
        cells: view.cells,
        degraded: !batch.success,
    }))
}

/// Snapshot of the published heatmap view state.
pub async fn get_status(State(state): State<Arc<DashboardState>>) -> Json<StatusResponse> {
    let heatmap = state.heatmap.read().await;
    let (phase, record_count) = match &heatmap.phase {
        LoadPhase::Loading => ("loading", 0),
        LoadPhase::Ready(batch) => ("ready", batch.data.len()),
        LoadPhase::Failed { .. } => ("failed", 0),
    };

    Json(StatusResponse {
        metric: heatmap.metric,
        phase: phase.to_string(),
        latest_seq: heatmap.latest_seq,
        record_count,
    })
}

/// Search the template catalog.
pub async fn get_templates(
    State(state): State<Arc<DashboardState>>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<TemplatesResponse>, StatusCode> {
    let templates = state.provider.fetch_templates().await.map_err(|e| {
        warn!(error = %e, "Template fetch failed");
        StatusCode::BAD_GATEWAY
    })?;

    let hits: Vec<TemplateView> = catalog::search(&templates, &query.search)
        .into_iter()
        .map(TemplateView::from)
        .collect();

    Ok(Json(TemplatesResponse {
        count: hits.len(),
        templates: hits,
    }))
}

/// Create a new screener from a template.
pub async fn create_from_template(
    State(state): State<Arc<DashboardState>>,
    Json(request): Json<CreateFromTemplateRequest>,
) -> Result<(StatusCode, Json<crate::templates::ScreenerDraft>), StatusCode> {
    let templates = state.provider.fetch_templates().await.map_err(|e| {
        warn!(error = %e, "Template fetch failed");
        StatusCode::BAD_GATEWAY
    })?;

    let instantiator = Instantiator::new(state.provider.clone());
    match instantiator
        .create_from_template(&templates, &request.template_id)
        .await
    {
        Ok(draft) => Ok((StatusCode::CREATED, Json(draft))),
        Err(e) if e.is_not_found() => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            warn!(error = %e, template_id = %request.template_id, "Screener creation failed");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MarketDataProvider, StockBatch};
    use crate::error::{Error, Result as CrateResult};
    use crate::heatmap::StockRecord;
    use crate::templates::ScreenerDraft;
    use crate::{router, DashboardState};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FixtureProvider {
        degraded: bool,
    }

    #[async_trait]
    impl MarketDataProvider for FixtureProvider {
        async fn fetch_stocks(&self, _limit: usize) -> CrateResult<StockBatch> {
            let records: Vec<StockRecord> = serde_json::from_value(json!([
                {"symbol": "AAPL", "change_percent": 6.1, "volume": 2_500_000, "market_cap": 3_000_000_000i64},
                {"symbol": "MSFT", "change_percent": -0.5, "volume": 1_000_000, "market_cap": 2_000_000_000i64}
            ]))
            .unwrap();
            if self.degraded {
                Ok(StockBatch::degraded(records))
            } else {
                Ok(StockBatch::ok(records))
            }
        }

        async fn fetch_templates(&self) -> CrateResult<Vec<Template>> {
            Ok(serde_json::from_value(json!([
                {
                    "id": "tpl_momentum",
                    "name": "Momentum Leaders",
                    "description": "High relative strength",
                    "category": "momentum",
                    "criteria": {"rsi": {"min": 60}},
                    "isPublic": true
                },
                {
                    "id": "tpl_value",
                    "name": "Deep Value",
                    "description": "Trading below book value",
                    "category": "value",
                    "criteria": {},
                    "isPublic": false
                }
            ]))
            .unwrap())
        }

        async fn create_screener(&self, draft: &ScreenerDraft) -> CrateResult<()> {
            if draft.is_public {
                return Err(Error::External("public drafts must never be sent".into()));
            }
            Ok(())
        }
    }

    fn test_app(degraded: bool) -> axum::Router {
        let state = Arc::new(DashboardState::with_provider(
            crate::config::Config::default(),
            Arc::new(FixtureProvider { degraded }),
        ));
        router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(false);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "marketboard");
    }

    #[tokio::test]
    async fn test_heatmap_renders_cells() {
        let app = test_app(false);
        let response = app
            .oneshot(
                Request::get("/api/v1/heatmap?metric=change_percent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["metric"], "change_percent");
        assert_eq!(body["count"], 2);
        assert_eq!(body["degraded"], false);
        assert_eq!(body["cells"][0]["symbol"], "AAPL");
        assert_eq!(body["cells"][0]["bucket"], "strong-positive");
        assert_eq!(body["cells"][0]["label"], "+6.10%");
    }

    #[tokio::test]
    async fn test_degraded_fetch_still_renders() {
        let app = test_app(true);
        let response = app
            .oneshot(
                Request::get("/api/v1/heatmap?metric=volume")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["degraded"], true);
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_template_search_filters() {
        let app = test_app(false);
        let response = app
            .oneshot(
                Request::get("/api/v1/templates?search=VALUE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["templates"][0]["id"], "tpl_value");
        assert_eq!(body["templates"][0]["categoryIcon"], "gem");
    }

    #[tokio::test]
    async fn test_template_search_empty_term_returns_all() {
        let app = test_app(false);
        let response = app
            .oneshot(
                Request::get("/api/v1/templates")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["templates"][0]["id"], "tpl_momentum");
    }

    #[tokio::test]
    async fn test_create_from_template_forces_private() {
        let app = test_app(false);
        let response = app
            .oneshot(
                Request::post("/api/v1/screeners/from-template")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"templateId": "tpl_momentum"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        // Source template is public; the created draft must not be
        assert_eq!(body["isPublic"], false);
        assert_eq!(body["name"], "Momentum Leaders");
    }

    #[tokio::test]
    async fn test_create_from_unknown_template_is_404() {
        let app = test_app(false);
        let response = app
            .oneshot(
                Request::post("/api/v1/screeners/from-template")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"templateId": "tpl_missing"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
