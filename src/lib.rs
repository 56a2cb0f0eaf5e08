pub mod adapters;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod nlp;
pub mod server;
pub mod utils;

pub use adapters::{HttpScraper, LocalStorage, NewsApiClient};
pub use client::{render_report, DashboardClient};
pub use config::{CliConfig, TomlConfig};
pub use crate::core::{engine::AnalysisEngine, pipeline::NewsPipeline};
pub use domain::model::{AnalysisReport, ProcessedArticle, Sentiment};
pub use server::{router, AppState};
pub use utils::error::{AnalyzerError, Result};
