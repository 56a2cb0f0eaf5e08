//! REST backend: `GET /analyze?company=NAME` and `GET /health`.
//!
//! Errors are returned as `{"detail": "..."}`. Anything the caller cannot fix
//! is reported as a generic 500 and logged in full.

use crate::core::engine::AnalysisEngine;
use crate::core::Pipeline;
use crate::domain::model::AnalysisReport;
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// Anything that can turn a company name into a report.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, company: &str) -> Result<AnalysisReport>;
}

#[async_trait]
impl<P: Pipeline> AnalysisService for AnalysisEngine<P> {
    async fn analyze(&self, company: &str) -> Result<AnalysisReport> {
        AnalysisEngine::analyze(self, company).await
    }
}

#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn AnalysisService>,
}

impl AppState {
    pub fn new<S: AnalysisService + 'static>(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    company: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", get(analyze))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
    }
}

async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> std::result::Result<Json<AnalysisReport>, AnalyzerError> {
    let company = params.company.unwrap_or_default();
    if company.trim().is_empty() {
        return Err(AnalyzerError::ValidationError {
            message: "Company name is required".to_string(),
        });
    }

    tracing::info!(company = %company.trim(), "Analyze request");
    let report = state.service.analyze(&company).await?;
    Ok(Json(report))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AnalyzerError::ValidationError { message } => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AnalyzerError::NoArticles { .. } => (
                StatusCode::NOT_FOUND,
                "No articles could be processed".to_string(),
            ),
            _ => {
                tracing::error!(
                    category = ?self.category(),
                    severity = ?self.severity(),
                    "Analysis failed: {}",
                    self
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ProcessedArticle, Sentiment};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    struct FakeService;

    #[async_trait]
    impl AnalysisService for FakeService {
        async fn analyze(&self, company: &str) -> Result<AnalysisReport> {
            match company {
                "Nobody" => Err(AnalyzerError::NoArticles {
                    company: company.to_string(),
                }),
                "Broken" => Err(AnalyzerError::NewsApiError {
                    code: "apiKeyInvalid".to_string(),
                    message: "secret details".to_string(),
                }),
                _ => Ok(AnalysisReport::new(
                    company,
                    vec![ProcessedArticle {
                        title: "Acme soars".to_string(),
                        url: "https://a.test/1".to_string(),
                        source: None,
                        published_at: None,
                        summary: "Shares soared.".to_string(),
                        sentiment: Sentiment::Positive,
                        topics: vec!["Acme".to_string()],
                    }],
                )),
            }
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let app = router(AppState::new(FakeService));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_analyze_returns_report() {
        let (status, body) = get_json("/analyze?company=Acme").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["company"], "Acme");
        assert_eq!(body["articles"][0]["sentiment"], "Positive");
        assert_eq!(body["overview"], "Acme analysis: 1 articles processed");
        assert_eq!(body["sentiment_breakdown"]["positive"], 1);
    }

    #[tokio::test]
    async fn test_missing_or_blank_company_is_bad_request() {
        let (status, body) = get_json("/analyze").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (status, _) = get_json("/analyze?company=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_no_articles_is_not_found() {
        let (status, body) = get_json("/analyze?company=Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No articles could be processed");
    }

    #[tokio::test]
    async fn test_other_errors_are_hidden() {
        let (status, body) = get_json("/analyze?company=Broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
    }
}
