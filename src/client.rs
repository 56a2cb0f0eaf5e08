//! Terminal dashboard: calls the REST backend and renders its report.

use crate::domain::model::AnalysisReport;
use crate::utils::error::{AnalyzerError, Result};
use reqwest::Client;
use std::fmt;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Uses `API_BASE` when set.
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::new(Client::new(), base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn analyze(&self, company: &str) -> Result<AnalysisReport> {
        let url = format!("{}/analyze", self.base_url);
        tracing::debug!("Requesting {} for '{}'", url, company);

        let response = self
            .client
            .get(&url)
            .query(&[("company", company)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
                .unwrap_or(body);
            return Err(AnalyzerError::BackendError {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }
}

pub fn render_report(report: &AnalysisReport) -> String {
    ReportView(report).to_string()
}

/// Plain-text layout of a report for the terminal.
pub struct ReportView<'a>(pub &'a AnalysisReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(60);

        writeln!(f, "{}", rule)?;
        writeln!(f, "News Summary: {}", report.company)?;
        writeln!(f, "{}", rule)?;

        for (i, article) in report.articles.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}. {}", i + 1, article.title)?;
            if let Some(source) = &article.source {
                writeln!(f, "   Source: {}", source)?;
            }
            writeln!(f, "   Summary: {}", article.summary)?;
            writeln!(f, "   Sentiment: {}", article.sentiment)?;
            if article.topics.is_empty() {
                writeln!(f, "   Topics: -")?;
            } else {
                writeln!(f, "   Topics: {}", article.topics.join(", "))?;
            }
        }

        let breakdown = &report.sentiment_breakdown;
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(
            f,
            "Sentiment: {} positive, {} neutral, {} negative (mostly {})",
            breakdown.positive,
            breakdown.neutral,
            breakdown.negative,
            breakdown.dominant()
        )?;
        writeln!(f, "{}", report.overview)
    }
}
