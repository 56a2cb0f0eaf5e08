//! Lexicon-based sentiment scoring.

use crate::domain::model::{Sentiment, SentimentScore};
use crate::nlp::lexicon::{FinancialLexicon, SentimentLexicon};
use crate::nlp::tokenizer::Tokenizer;

/// Only the lead of an article is scored; it carries the headline claim.
pub const MAX_SCORED_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer<L: SentimentLexicon = FinancialLexicon> {
    tokenizer: Tokenizer,
    lexicon: L,
    /// How many tokens after a negation are flipped.
    negation_window: usize,
    max_chars: usize,
}

impl SentimentAnalyzer<FinancialLexicon> {
    pub fn new() -> Self {
        Self::with_lexicon(FinancialLexicon::new())
    }
}

impl Default for SentimentAnalyzer<FinancialLexicon> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SentimentLexicon> SentimentAnalyzer<L> {
    pub fn with_lexicon(lexicon: L) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            lexicon,
            negation_window: 3,
            max_chars: MAX_SCORED_CHARS,
        }
    }

    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn analyze(&self, text: &str) -> SentimentScore {
        let lead: String = text.chars().take(self.max_chars).collect();
        let tokens = self.tokenizer.words(&lead);

        let mut total_score = 0.0;
        let mut matched = 0usize;
        let mut modifier = 1.0;
        let mut negation_active = false;
        let mut since_negation = 0usize;

        for token in &tokens {
            if self.lexicon.is_negation(token) {
                negation_active = true;
                since_negation = 0;
                continue;
            }

            if let Some(m) = self.lexicon.get_modifier(token) {
                modifier = m;
                continue;
            }

            if let Some(base) = self.lexicon.get_score(token) {
                let mut score = base * modifier;
                if negation_active && since_negation < self.negation_window {
                    score = -score * 0.8;
                }
                total_score += score;
                matched += 1;
                modifier = 1.0;
            }

            if negation_active {
                since_negation += 1;
                if since_negation >= self.negation_window {
                    negation_active = false;
                }
            }
        }

        let score = if matched > 0 {
            (total_score / matched as f64).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        SentimentScore {
            label: Sentiment::from_score(score),
            score,
            confidence: confidence(matched, tokens.len()),
        }
    }
}

fn confidence(matched: usize, total: usize) -> f64 {
    if total == 0 || matched == 0 {
        return 0.0;
    }
    let ratio = matched as f64 / total as f64;
    let coverage = (matched as f64).min(5.0) / 5.0;
    (ratio * 0.5 + coverage * 0.5).min(1.0)
}
