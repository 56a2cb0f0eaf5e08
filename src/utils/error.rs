use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("News API error ({code}): {message}")]
    NewsApiError { code: String, message: String },

    #[error("Failed to scrape {url}: {reason}")]
    ScrapeError { url: String, reason: String },

    #[error("Backend returned {status}: {detail}")]
    BackendError { status: u16, detail: String },

    #[error("No articles could be processed for '{company}'")]
    NoArticles { company: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Upstream,
    Processing,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::MissingConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ValidationError { .. } => ErrorCategory::Configuration,
            AnalyzerError::HttpError(_) | AnalyzerError::ScrapeError { .. } => {
                ErrorCategory::Network
            }
            AnalyzerError::NewsApiError { .. } | AnalyzerError::BackendError { .. } => {
                ErrorCategory::Upstream
            }
            AnalyzerError::CsvError(_)
            | AnalyzerError::SerializationError(_)
            | AnalyzerError::NoArticles { .. } => ErrorCategory::Processing,
            AnalyzerError::ZipError(_) | AnalyzerError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Processing => match self {
                AnalyzerError::NoArticles { .. } => ErrorSeverity::Low,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalyzerError::MissingConfigError { .. } => {
                "Provide the missing value via CLI flag, config file or environment variable"
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ValidationError { .. } => "Check the configuration values and retry",
            AnalyzerError::NewsApiError { .. } => {
                "Verify NEWS_API_KEY is valid and the daily request quota is not exhausted"
            }
            AnalyzerError::HttpError(_) | AnalyzerError::ScrapeError { .. } => {
                "Check network connectivity and retry later"
            }
            AnalyzerError::BackendError { .. } => {
                "Make sure the news-api server is running and API_BASE points at it"
            }
            AnalyzerError::NoArticles { .. } => {
                "Try a different or more widely covered company name"
            }
            AnalyzerError::CsvError(_) | AnalyzerError::SerializationError(_) => {
                "This is likely a bug; rerun with --verbose and report the log"
            }
            AnalyzerError::ZipError(_) | AnalyzerError::IoError(_) => {
                "Check that the output path exists and is writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalyzerError::NoArticles { company } => {
                format!("No news articles about '{}' could be analyzed", company)
            }
            AnalyzerError::NewsApiError { message, .. } => {
                format!("The news service rejected the request: {}", message)
            }
            AnalyzerError::BackendError { status, detail } => {
                format!("The analysis backend failed ({}): {}", status, detail)
            }
            AnalyzerError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
