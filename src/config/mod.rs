pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_NEWS_ENDPOINT: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "stock",
    "market",
    "shares",
    "revenue",
    "earnings",
    "merger",
    "acquisition",
];
/// NewsAPI rejects larger pages.
pub const MAX_PAGE_SIZE: usize = 100;

/// Analysis settings shared by the CLI and the API server.
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_NEWS_ENDPOINT))]
    pub news_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, env = "NEWS_API_KEY", hide_env_values = true))]
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "en"))]
    pub language: String,

    #[cfg_attr(
        feature = "cli",
        arg(
            long,
            value_delimiter = ',',
            default_value = "stock,market,shares,revenue,earnings,merger,acquisition"
        )
    )]
    pub keywords: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "10"))]
    pub max_results: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "4"))]
    pub concurrent_requests: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "10"))]
    pub scrape_timeout_secs: u64,

    #[cfg_attr(feature = "cli", arg(long, default_value = "5"))]
    pub max_topics: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "3"))]
    pub summary_sentences: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "400"))]
    pub summary_max_chars: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log process CPU and memory usage"))]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            news_endpoint: DEFAULT_NEWS_ENDPOINT.to_string(),
            api_key: None,
            language: "en".to_string(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_results: 10,
            concurrent_requests: 4,
            scrape_timeout_secs: 10,
            max_topics: 5,
            summary_sentences: 3,
            summary_max_chars: 400,
            output_path: "./output".to_string(),
            verbose: false,
            monitor: false,
        }
    }
}

/// Shown in place of secrets in `Debug` output.
pub const REDACTED: &str = "<redacted>";

// hand-written so `--verbose` never prints the key
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("news_endpoint", &self.news_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("language", &self.language)
            .field("keywords", &self.keywords)
            .field("max_results", &self.max_results)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("max_topics", &self.max_topics)
            .field("summary_sentences", &self.summary_sentences)
            .field("summary_max_chars", &self.summary_max_chars)
            .field("output_path", &self.output_path)
            .field("verbose", &self.verbose)
            .field("monitor", &self.monitor)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn news_endpoint(&self) -> &str {
        &self.news_endpoint
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn max_results(&self) -> usize {
        self.max_results
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn scrape_timeout_secs(&self) -> u64 {
        self.scrape_timeout_secs
    }

    fn max_topics(&self) -> usize {
        self.max_topics
    }

    fn summary_sentences(&self) -> usize {
        self.summary_sentences
    }

    fn summary_max_chars(&self) -> usize {
        self.summary_max_chars
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every `ConfigProvider`.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_url("news_endpoint", config.news_endpoint())?;
    if config.api_key().trim().is_empty() {
        return Err(crate::utils::error::AnalyzerError::MissingConfigError {
            field: "api_key (NEWS_API_KEY)".to_string(),
        });
    }
    validation::validate_non_empty_string("language", config.language())?;
    validation::validate_range("max_results", config.max_results(), 1, MAX_PAGE_SIZE)?;
    validation::validate_positive_number("concurrent_requests", config.concurrent_requests(), 1)?;
    validation::validate_positive_number(
        "scrape_timeout_secs",
        config.scrape_timeout_secs() as usize,
        1,
    )?;
    validation::validate_positive_number("max_topics", config.max_topics(), 1)?;
    validation::validate_positive_number("summary_sentences", config.summary_sentences(), 1)?;
    validation::validate_positive_number("summary_max_chars", config.summary_max_chars(), 20)?;
    validation::validate_path("output_path", config.output_path())?;
    Ok(())
}
