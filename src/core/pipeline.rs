use crate::adapters::{HttpScraper, LocalStorage, NewsApiClient};
use crate::core::analyzer::ArticleAnalyzer;
use crate::core::{ArticleScraper, ConfigProvider, NewsSource, Pipeline, Storage};
use crate::domain::model::{AnalysisReport, NewsItem, ProcessedArticle, TransformResult};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::validate_company;
use reqwest::Client;
use std::io::Write;
use std::sync::Arc;
use tokio::task::JoinSet;
use zip::write::{FileOptions, ZipWriter};

pub const BUNDLE_FILE: &str = "news_report.zip";

const CSV_HEADER: [&str; 7] = [
    "title",
    "url",
    "source",
    "published_at",
    "sentiment",
    "topics",
    "summary",
];

pub struct NewsPipeline<N, A, S, C>
where
    N: NewsSource,
    A: ArticleScraper + 'static,
    S: Storage,
    C: ConfigProvider,
{
    source: N,
    scraper: Arc<A>,
    analyzer: Arc<ArticleAnalyzer>,
    storage: S,
    config: C,
}

impl<N, A, S, C> NewsPipeline<N, A, S, C>
where
    N: NewsSource,
    A: ArticleScraper + 'static,
    S: Storage,
    C: ConfigProvider,
{
    pub fn new(source: N, scraper: A, storage: S, config: C) -> Self {
        let analyzer = ArticleAnalyzer::from_config(&config);
        Self {
            source,
            scraper: Arc::new(scraper),
            analyzer: Arc::new(analyzer),
            storage,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<C: ConfigProvider> NewsPipeline<NewsApiClient, HttpScraper, LocalStorage, C> {
    /// Wires the HTTP adapters up around one shared connection pool.
    pub fn from_config(config: C) -> Result<Self> {
        let client = Client::builder().build()?;
        let source = NewsApiClient::new(client.clone(), &config);
        let scraper = HttpScraper::new(client, config.scrape_timeout_secs());
        let storage = LocalStorage::new(config.output_path().to_string());
        Ok(Self::new(source, scraper, storage, config))
    }
}

/// Turns the transform output into a report; an empty result is an error.
pub fn build_report(company: &str, result: TransformResult) -> Result<AnalysisReport> {
    if result.articles.is_empty() {
        return Err(AnalyzerError::NoArticles {
            company: company.to_string(),
        });
    }
    Ok(AnalysisReport::new(company, result.articles))
}

#[async_trait::async_trait]
impl<N, A, S, C> Pipeline for NewsPipeline<N, A, S, C>
where
    N: NewsSource,
    A: ArticleScraper + 'static,
    S: Storage,
    C: ConfigProvider,
{
    async fn extract(&self, company: &str) -> Result<Vec<NewsItem>> {
        validate_company(company)?;

        let items = self.source.fetch_articles(company.trim()).await?;
        let total = items.len();
        let items: Vec<NewsItem> = items
            .into_iter()
            .filter(|item| item.url.starts_with("http"))
            .collect();

        if items.len() < total {
            tracing::debug!("Dropped {} items without a usable URL", total - items.len());
        }
        Ok(items)
    }

    async fn transform(&self, items: Vec<NewsItem>) -> Result<TransformResult> {
        let limit = self.config.concurrent_requests().max(1);
        let urls: Vec<String> = items.iter().map(|item| item.url.clone()).collect();
        let mut tasks = JoinSet::new();
        let mut slots: Vec<Slot> = Vec::new();

        for (idx, item) in items.into_iter().enumerate() {
            // at most `limit` pages in flight
            while tasks.len() >= limit {
                collect_next(&mut tasks, &mut slots).await;
            }

            let scraper = Arc::clone(&self.scraper);
            let analyzer = Arc::clone(&self.analyzer);
            tasks.spawn(async move {
                (idx, process_item(scraper.as_ref(), &analyzer, &item).await)
            });
        }
        while !tasks.is_empty() {
            collect_next(&mut tasks, &mut slots).await;
        }

        // a panicked or cancelled task leaves its slot empty
        let mut outcomes: Vec<Option<Result<ProcessedArticle>>> =
            urls.iter().map(|_| None).collect();
        for (idx, outcome) in slots {
            outcomes[idx] = Some(outcome);
        }

        let mut result = TransformResult::default();
        for (url, outcome) in urls.into_iter().zip(outcomes) {
            match outcome {
                Some(Ok(article)) => result.articles.push(article),
                Some(Err(e)) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    result.skipped.push(url);
                }
                None => {
                    tracing::warn!("Skipping {}: task did not complete", url);
                    result.skipped.push(url);
                }
            }
        }

        tracing::debug!(
            "Processed {} articles, skipped {}",
            result.articles.len(),
            result.skipped.len()
        );
        Ok(result)
    }

    async fn load(&self, report: &AnalysisReport) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), BUNDLE_FILE);

        let csv_data = articles_csv(&report.articles)?;
        let json_data = serde_json::to_string_pretty(report)?;

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("articles.csv", FileOptions::default())?;
            zip.write_all(&csv_data)?;

            zip.start_file::<_, ()>("report.json", FileOptions::default())?;
            zip.write_all(json_data.as_bytes())?;

            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes)", zip_data.len());
        self.storage.write_file(BUNDLE_FILE, &zip_data).await?;

        Ok(output_path)
    }
}

async fn process_item<A: ArticleScraper + ?Sized>(
    scraper: &A,
    analyzer: &ArticleAnalyzer,
    item: &NewsItem,
) -> Result<ProcessedArticle> {
    let page = scraper.scrape(&item.url).await?;
    analyzer
        .analyze(item, &page)
        .ok_or_else(|| AnalyzerError::ScrapeError {
            url: item.url.clone(),
            reason: "page has no readable text".to_string(),
        })
}

type Slot = (usize, Result<ProcessedArticle>);

async fn collect_next(tasks: &mut JoinSet<Slot>, slots: &mut Vec<Slot>) {
    match tasks.join_next().await {
        Some(Ok(slot)) => slots.push(slot),
        Some(Err(e)) => tracing::error!("Article task aborted: {}", e),
        None => {}
    }
}

fn articles_csv(articles: &[ProcessedArticle]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for article in articles {
        let published = article
            .published_at
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default();
        writer.write_record([
            article.title.as_str(),
            article.url.as_str(),
            article.source.as_deref().unwrap_or(""),
            published.as_str(),
            article.sentiment.as_str(),
            article.topics.join("; ").as_str(),
            article.summary.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AnalyzerError::IoError(e.into_error()))
}
