//! Text analysis: tokenizing, sentiment, topics and summaries.

pub mod lexicon;
pub mod sentiment;
pub mod summary;
pub mod tokenizer;
pub mod topics;

pub use lexicon::{FinancialLexicon, SentimentLexicon};
pub use sentiment::SentimentAnalyzer;
pub use summary::summarize;
pub use tokenizer::{split_sentences, Tokenizer};
pub use topics::{TopicExtractor, TopicKind};
