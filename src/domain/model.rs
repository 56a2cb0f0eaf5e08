use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hit from the news search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "source_name")]
    pub source: Option<String>,
}

// NewsAPI nests the publisher as {"id": .., "name": ..}
fn source_name<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Source {
        Nested { name: Option<String> },
        Flat(String),
    }

    Ok(match Option::<Source>::deserialize(deserializer)? {
        Some(Source::Nested { name }) => name,
        Some(Source::Flat(name)) => Some(name),
        None => None,
    })
}

// Removed articles come back with "url": null
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score > 0.1 {
            Sentiment::Positive
        } else if score < -0.1 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: Sentiment,
    pub score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub summary: String,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentBreakdown {
    pub fn from_articles(articles: &[ProcessedArticle]) -> Self {
        articles
            .iter()
            .fold(Self::default(), |mut acc, article| {
                match article.sentiment {
                    Sentiment::Positive => acc.positive += 1,
                    Sentiment::Neutral => acc.neutral += 1,
                    Sentiment::Negative => acc.negative += 1,
                }
                acc
            })
    }

    pub fn dominant(&self) -> Sentiment {
        if self.positive > self.negative && self.positive >= self.neutral {
            Sentiment::Positive
        } else if self.negative > self.positive && self.negative >= self.neutral {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub company: String,
    pub articles: Vec<ProcessedArticle>,
    pub overview: String,
    pub sentiment_breakdown: SentimentBreakdown,
}

impl AnalysisReport {
    pub fn new(company: &str, articles: Vec<ProcessedArticle>) -> Self {
        let overview = format!(
            "{} analysis: {} articles processed",
            company,
            articles.len()
        );
        let sentiment_breakdown = SentimentBreakdown::from_articles(&articles);
        Self {
            company: company.to_string(),
            articles,
            overview,
            sentiment_breakdown,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub articles: Vec<ProcessedArticle>,
    pub skipped: Vec<String>,
}
