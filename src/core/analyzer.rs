use crate::adapters::page_scraper::NO_TITLE;
use crate::domain::model::{NewsItem, ProcessedArticle, ScrapedPage};
use crate::domain::ports::ConfigProvider;
use crate::nlp::{summarize, SentimentAnalyzer, TopicExtractor};

/// Turns one scraped page into a `ProcessedArticle`.
#[derive(Debug, Clone)]
pub struct ArticleAnalyzer {
    sentiment: SentimentAnalyzer,
    topics: TopicExtractor,
    max_topics: usize,
    summary_sentences: usize,
    summary_max_chars: usize,
}

impl ArticleAnalyzer {
    pub fn new(max_topics: usize, summary_sentences: usize, summary_max_chars: usize) -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
            topics: TopicExtractor::new(),
            max_topics,
            summary_sentences,
            summary_max_chars,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(
            config.max_topics(),
            config.summary_sentences(),
            config.summary_max_chars(),
        )
    }

    /// Returns `None` when the page has no text to analyze.
    pub fn analyze(&self, item: &NewsItem, page: &ScrapedPage) -> Option<ProcessedArticle> {
        let content = page.content.trim();
        if content.is_empty() {
            return None;
        }

        // fall back to the search hit's headline for pages without <title>
        let title = match (&item.title, page.title.as_str()) {
            (Some(headline), NO_TITLE) if !headline.trim().is_empty() => headline.clone(),
            _ => page.title.clone(),
        };

        Some(ProcessedArticle {
            title,
            url: item.url.clone(),
            source: item.source.clone(),
            published_at: item.published_at,
            summary: summarize(content, self.summary_sentences, self.summary_max_chars),
            sentiment: self.sentiment.analyze(content).label,
            topics: self.topics.extract(content, self.max_topics),
        })
    }
}
