//! Article page download and text extraction.

use crate::domain::model::ScrapedPage;
use crate::domain::ports::ArticleScraper;
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Meta descriptions shorter than this fall back to paragraph text.
const MIN_DESCRIPTION_CHARS: usize = 100;

pub const NO_TITLE: &str = "No title available";

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:description"]"#));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| selector("article"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css}: {e}"))
}

#[derive(Debug, Clone)]
pub struct HttpScraper {
    client: Client,
    timeout: Duration,
}

impl HttpScraper {
    pub fn new(client: Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn scrape_error(url: &str, reason: impl Into<String>) -> AnalyzerError {
        AnalyzerError::ScrapeError {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ArticleScraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", "NewsAnalyzer/0.1 (+article-scraper)")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::scrape_error(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::scrape_error(
                url,
                format!(
                    "HTTP error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        if response.content_length().unwrap_or(0) > MAX_BODY_SIZE as u64 {
            return Err(Self::scrape_error(url, "response too large"));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::scrape_error(url, e.to_string()))?;
        if body.len() > MAX_BODY_SIZE {
            return Err(Self::scrape_error(url, "response too large"));
        }

        Ok(extract_page(&String::from_utf8_lossy(&body)))
    }
}

/// Pulls the title and the readable description out of an article page.
///
/// The page's meta description (or its OpenGraph equivalent) is preferred.
/// When it is missing or too short to analyze, the paragraphs of the first
/// `<article>` element, or of the whole page if there is none, are used
/// instead, one per line.
pub fn extract_page(html: &str) -> ScrapedPage {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let mut content = meta_content(&document, &META_DESCRIPTION)
        .or_else(|| meta_content(&document, &OG_DESCRIPTION))
        .unwrap_or_default();

    if content.chars().count() < MIN_DESCRIPTION_CHARS {
        let paragraphs = match document.select(&ARTICLE).next() {
            Some(article) => paragraph_text(article),
            None => paragraph_text(document.root_element()),
        };
        if !paragraphs.is_empty() || content.is_empty() {
            content = paragraphs;
        }
    }

    ScrapedPage { title, content }
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

fn paragraph_text(root: ElementRef) -> String {
    root.select(&PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const LONG_DESCRIPTION: &str = "Acme Corp said quarterly revenue rose sharply on strong demand \
        for its electric trucks, beating analyst expectations across every region.";

    #[test]
    fn test_extract_prefers_long_meta_description() {
        let html = format!(
            r#"<html><head><title> Acme beats estimates </title>
            <meta name="description" content="{LONG_DESCRIPTION}"></head>
            <body><p>Paragraph text</p></body></html>"#
        );
        let page = extract_page(&html);
        assert_eq!(page.title, "Acme beats estimates");
        assert_eq!(page.content, LONG_DESCRIPTION);
    }

    #[test]
    fn test_extract_uses_og_description_when_meta_missing() {
        let html = format!(
            r#"<html><head><meta property="og:description" content="{LONG_DESCRIPTION}"></head>
            <body></body></html>"#
        );
        let page = extract_page(&html);
        assert_eq!(page.title, NO_TITLE);
        assert_eq!(page.content, LONG_DESCRIPTION);
    }

    #[test]
    fn test_short_description_falls_back_to_article_paragraphs() {
        let html = r#"<html><head><title>t</title>
            <meta name="description" content="Too short"></head>
            <body>
              <p>Cookie banner</p>
              <article><p>First   paragraph.</p><p></p><p>Second paragraph.</p></article>
            </body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.content, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_paragraphs_from_whole_document_without_article() {
        let html = "<html><body><div><p>One</p></div><p>Two</p></body></html>";
        assert_eq!(extract_page(html).content, "One\nTwo");
    }

    #[test]
    fn test_short_description_kept_when_no_paragraphs() {
        let html = r#"<html><head><meta name="description" content="Short but present"></head></html>"#;
        assert_eq!(extract_page(html).content, "Short but present");
    }

    #[test]
    fn test_empty_page_has_no_content() {
        let page = extract_page("");
        assert_eq!(page.title, NO_TITLE);
        assert!(page.content.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_fetches_and_extracts() {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/story");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body("<html><head><title>Story</title></head><body><p>Body</p></body></html>");
            })
            .await;

        let scraper = HttpScraper::new(Client::new(), 5);
        let page = scraper.scrape(&server.url("/story")).await.unwrap();

        page_mock.assert_async().await;
        assert_eq!(page.title, "Story");
        assert_eq!(page.content, "Body");
    }

    #[tokio::test]
    async fn test_scrape_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404);
            })
            .await;

        let scraper = HttpScraper::new(Client::new(), 5);
        let err = scraper.scrape(&server.url("/gone")).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
