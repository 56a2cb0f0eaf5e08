use crate::config::{validate_provider, DEFAULT_KEYWORDS, DEFAULT_NEWS_ENDPOINT, REDACTED};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub news: NewsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &REDACTED)
            .field("language", &self.language)
            .field("keywords", &self.keywords)
            .field("max_results", &self.max_results)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub concurrent_requests: Option<usize>,
    pub scrape_timeout_secs: Option<u64>,
    pub max_topics: Option<usize>,
    pub summary_sentences: Option<usize>,
    pub summary_max_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_NEWS_ENDPOINT.to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_max_results() -> usize {
    10
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses config text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    // unknown variables are left as-is so validation can name them
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn bind_address(&self) -> &str {
        &self.server.bind
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref()?.log_level.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn news_endpoint(&self) -> &str {
        &self.news.endpoint
    }

    fn api_key(&self) -> &str {
        &self.news.api_key
    }

    fn language(&self) -> &str {
        &self.news.language
    }

    fn keywords(&self) -> &[String] {
        &self.news.keywords
    }

    fn max_results(&self) -> usize {
        self.news.max_results
    }

    fn concurrent_requests(&self) -> usize {
        self.analysis.concurrent_requests.unwrap_or(4)
    }

    fn scrape_timeout_secs(&self) -> u64 {
        self.analysis.scrape_timeout_secs.unwrap_or(10)
    }

    fn max_topics(&self) -> usize {
        self.analysis.max_topics.unwrap_or(5)
    }

    fn summary_sentences(&self) -> usize {
        self.analysis.summary_sentences.unwrap_or(3)
    }

    fn summary_max_chars(&self) -> usize {
        self.analysis.summary_max_chars.unwrap_or(400)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if ENV_VAR_PATTERN.is_match(&self.news.api_key) {
            return Err(AnalyzerError::MissingConfigError {
                field: format!("news.api_key ({} is not set)", self.news.api_key),
            });
        }
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_toml_config() {
        let toml_content = r#"
[news]
api_key = "abc123"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.news_endpoint(), DEFAULT_NEWS_ENDPOINT);
        assert_eq!(config.max_results(), 10);
        assert_eq!(config.concurrent_requests(), 4);
        assert_eq!(config.max_topics(), 5);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.keywords().len(), 7);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[news]
endpoint = "https://news.example.com/v2/everything"
api_key = "abc123"
language = "de"
keywords = ["earnings"]
max_results = 25

[analysis]
concurrent_requests = 8
max_topics = 3

[server]
bind = "127.0.0.1:9000"

[output]
path = "/tmp/reports"

[monitoring]
enabled = true
log_level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.language(), "de");
        assert_eq!(config.keywords(), ["earnings".to_string()]);
        assert_eq!(config.max_results(), 25);
        assert_eq!(config.concurrent_requests(), 8);
        assert_eq!(config.max_topics(), 3);
        assert_eq!(config.scrape_timeout_secs(), 10);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.output_path(), "/tmp/reports");
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NEWS_ANALYZER_TEST_KEY", "from-env");

        let toml_content = r#"
[news]
api_key = "${NEWS_ANALYZER_TEST_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "from-env");

        std::env::remove_var("NEWS_ANALYZER_TEST_KEY");
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = TomlConfig::from_toml_str("[news]\napi_key = \"super-secret-key\"\n").unwrap();

        let shown = format!("{:?}", config);
        assert!(!shown.contains("super-secret-key"));
        assert!(shown.contains(REDACTED));
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[news]
api_key = "${NEWS_ANALYZER_DEFINITELY_UNSET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("NEWS_ANALYZER_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let toml_content = r#"
[news]
endpoint = "invalid-url"
api_key = "abc"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_news_table_is_parse_error() {
        let err = TomlConfig::from_toml_str("[server]\nbind = \"0.0.0.0:1\"\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[news]\napi_key = \"file-key\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_key(), "file-key");
    }
}
