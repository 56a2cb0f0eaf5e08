use crate::domain::model::{AnalysisReport, NewsItem, ScrapedPage, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn news_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn language(&self) -> &str;
    fn keywords(&self) -> &[String];
    fn max_results(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn scrape_timeout_secs(&self) -> u64;
    fn max_topics(&self) -> usize;
    fn summary_sentences(&self) -> usize;
    fn summary_max_chars(&self) -> usize;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_articles(&self, company: &str) -> Result<Vec<NewsItem>>;
}

#[async_trait]
pub trait ArticleScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, company: &str) -> Result<Vec<NewsItem>>;
    async fn transform(&self, items: Vec<NewsItem>) -> Result<TransformResult>;
    async fn load(&self, report: &AnalysisReport) -> Result<String>;
}
