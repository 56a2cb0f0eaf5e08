// Adapters layer: concrete implementations for external systems (news API, web pages, disk).

pub mod newsapi;
pub mod page_scraper;
pub mod storage;

pub use newsapi::NewsApiClient;
pub use page_scraper::HttpScraper;
pub use storage::LocalStorage;
