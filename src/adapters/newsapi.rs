//! Client for the NewsAPI `/v2/everything` search endpoint.

use crate::domain::model::NewsItem;
use crate::domain::ports::{ConfigProvider, NewsSource};
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsItem>,
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
    keywords: Vec<String>,
    page_size: usize,
}

impl NewsApiClient {
    pub fn new<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Self {
        Self {
            client,
            endpoint: config.news_endpoint().to_string(),
            api_key: config.api_key().to_string(),
            language: config.language().to_string(),
            keywords: config.keywords().to_vec(),
            page_size: config.max_results(),
        }
    }

    /// Builds the search expression: the exact company phrase AND any of the
    /// business keywords.
    pub fn build_query(&self, company: &str) -> String {
        let company = company.trim();
        if self.keywords.is_empty() {
            return format!("\"{}\"", company);
        }
        format!("\"{}\" AND ({})", company, self.keywords.join(" OR "))
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_articles(&self, company: &str) -> Result<Vec<NewsItem>> {
        let query = self.build_query(company);
        let page_size = self.page_size.to_string();
        tracing::debug!("Searching news: {}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("language", self.language.as_str()),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("News API response status: {}", status);

        let body = response.text().await?;
        let parsed: SearchResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if !status.is_success() => {
                return Err(AnalyzerError::NewsApiError {
                    code: status.as_u16().to_string(),
                    message: format!("unreadable error body: {}", e),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() || parsed.status != "ok" {
            return Err(AnalyzerError::NewsApiError {
                code: parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
                message: parsed
                    .message
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            });
        }

        tracing::info!(
            "News API returned {} articles for '{}'",
            parsed.articles.len(),
            company
        );
        Ok(parsed.articles)
    }
}
