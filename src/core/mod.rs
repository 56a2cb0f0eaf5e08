pub mod analyzer;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AnalysisReport, NewsItem, TransformResult};
pub use crate::domain::ports::{ArticleScraper, ConfigProvider, NewsSource, Pipeline, Storage};
pub use crate::utils::error::Result;
