//! Sentiment word lists tuned for business and market news.

use std::collections::{HashMap, HashSet};

pub trait SentimentLexicon: Send + Sync {
    /// Polarity of a word in [-1.0, 1.0], if the word carries one.
    fn get_score(&self, word: &str) -> Option<f64>;

    /// Multiplier applied to the next scored word ("sharply", "slightly").
    fn get_modifier(&self, word: &str) -> Option<f64>;

    fn is_negation(&self, word: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct FinancialLexicon {
    scores: HashMap<String, f64>,
    modifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl FinancialLexicon {
    pub fn new() -> Self {
        let strong_positive = [
            ("soar", 0.9),
            ("soars", 0.9),
            ("soared", 0.9),
            ("surge", 0.85),
            ("surges", 0.85),
            ("surged", 0.85),
            ("skyrocket", 0.9),
            ("skyrocketed", 0.9),
            ("record", 0.7),
            ("beat", 0.7),
            ("beats", 0.7),
            ("outperform", 0.75),
            ("outperformed", 0.75),
            ("upgrade", 0.75),
            ("upgraded", 0.75),
            ("breakthrough", 0.8),
            ("bullish", 0.8),
            ("rally", 0.8),
            ("rallied", 0.8),
            ("profit", 0.7),
            ("profitable", 0.75),
            ("profits", 0.7),
            ("excellent", 0.8),
            ("strong", 0.65),
            ("stronger", 0.65),
            ("success", 0.7),
            ("successful", 0.7),
            ("boom", 0.75),
            ("jump", 0.7),
            ("jumps", 0.7),
            ("jumped", 0.7),
            ("impressive", 0.75),
            ("exceeded", 0.7),
            ("exceeds", 0.7),
        ];

        let moderate_positive = [
            ("gain", 0.5),
            ("gains", 0.5),
            ("gained", 0.5),
            ("rise", 0.5),
            ("rises", 0.5),
            ("rose", 0.5),
            ("rising", 0.5),
            ("up", 0.3),
            ("higher", 0.45),
            ("growth", 0.55),
            ("grow", 0.5),
            ("grew", 0.5),
            ("growing", 0.5),
            ("expand", 0.45),
            ("expansion", 0.45),
            ("improve", 0.5),
            ("improved", 0.5),
            ("improvement", 0.5),
            ("recover", 0.5),
            ("recovery", 0.5),
            ("rebound", 0.5),
            ("optimistic", 0.6),
            ("optimism", 0.6),
            ("positive", 0.5),
            ("good", 0.5),
            ("opportunity", 0.5),
            ("innovative", 0.5),
            ("innovation", 0.45),
            ("launch", 0.35),
            ("launches", 0.35),
            ("partnership", 0.45),
            ("approval", 0.5),
            ("approved", 0.5),
            ("dividend", 0.4),
            ("buyback", 0.45),
            ("demand", 0.3),
            ("stable", 0.3),
            ("resilient", 0.5),
            ("win", 0.55),
            ("wins", 0.55),
            ("won", 0.55),
        ];

        let strong_negative = [
            ("plunge", -0.9),
            ("plunges", -0.9),
            ("plunged", -0.9),
            ("crash", -0.9),
            ("crashed", -0.9),
            ("collapse", -0.9),
            ("collapsed", -0.9),
            ("bankrupt", -0.95),
            ("bankruptcy", -0.95),
            ("fraud", -0.95),
            ("scandal", -0.85),
            ("lawsuit", -0.7),
            ("sued", -0.7),
            ("probe", -0.6),
            ("investigation", -0.6),
            ("recall", -0.65),
            ("recalls", -0.65),
            ("layoffs", -0.75),
            ("layoff", -0.75),
            ("downgrade", -0.75),
            ("downgraded", -0.75),
            ("bearish", -0.8),
            ("slump", -0.8),
            ("slumped", -0.8),
            ("tumble", -0.8),
            ("tumbled", -0.8),
            ("loss", -0.7),
            ("losses", -0.7),
            ("default", -0.8),
            ("crisis", -0.85),
            ("miss", -0.65),
            ("missed", -0.65),
            ("misses", -0.65),
            ("fined", -0.7),
            ("penalty", -0.65),
            ("terrible", -0.8),
            ("worst", -0.85),
        ];

        let moderate_negative = [
            ("fall", -0.5),
            ("falls", -0.5),
            ("fell", -0.5),
            ("falling", -0.5),
            ("drop", -0.5),
            ("drops", -0.5),
            ("dropped", -0.5),
            ("decline", -0.5),
            ("declined", -0.5),
            ("declines", -0.5),
            ("down", -0.3),
            ("lower", -0.45),
            ("weak", -0.5),
            ("weaker", -0.5),
            ("slow", -0.4),
            ("slowdown", -0.5),
            ("cut", -0.45),
            ("cuts", -0.45),
            ("risk", -0.4),
            ("risks", -0.4),
            ("concern", -0.45),
            ("concerns", -0.45),
            ("uncertainty", -0.45),
            ("volatile", -0.35),
            ("volatility", -0.35),
            ("warning", -0.5),
            ("warns", -0.5),
            ("pressure", -0.35),
            ("delay", -0.4),
            ("delayed", -0.4),
            ("debt", -0.35),
            ("negative", -0.5),
            ("bad", -0.5),
            ("struggle", -0.5),
            ("struggles", -0.5),
            ("struggling", -0.5),
            ("pessimistic", -0.6),
            ("disappointing", -0.6),
            ("overvalued", -0.5),
            ("bubble", -0.55),
        ];

        let scores = strong_positive
            .iter()
            .chain(moderate_positive.iter())
            .chain(strong_negative.iter())
            .chain(moderate_negative.iter())
            .map(|(word, score)| (word.to_string(), *score))
            .collect();

        let modifiers = [
            ("very", 1.5),
            ("sharply", 1.6),
            ("significantly", 1.5),
            ("substantially", 1.5),
            ("dramatically", 1.7),
            ("extremely", 1.8),
            ("highly", 1.4),
            ("strongly", 1.4),
            ("steeply", 1.6),
            ("slightly", 0.7),
            ("modestly", 0.7),
            ("marginally", 0.6),
            ("somewhat", 0.8),
            ("barely", 0.6),
            ("possibly", 0.7),
        ]
        .into_iter()
        .map(|(word, multiplier)| (word.to_string(), multiplier))
        .collect();

        let negations = [
            "not", "no", "never", "neither", "nor", "without", "dont", "don't", "doesnt",
            "doesn't", "didnt", "didn't", "cant", "can't", "couldnt", "couldn't", "wont", "won't",
            "wouldnt", "wouldn't", "isnt", "isn't", "arent", "aren't", "wasnt", "wasn't",
            "werent", "weren't", "hasnt", "hasn't", "havent", "haven't", "failed", "fails",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            scores,
            modifiers,
            negations,
        }
    }

    /// Adds or overrides a scored word.
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.scores
            .insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Default for FinancialLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for FinancialLexicon {
    fn get_score(&self, word: &str) -> Option<f64> {
        self.scores.get(&word.to_lowercase()).copied()
    }

    fn get_modifier(&self, word: &str) -> Option<f64> {
        self.modifiers.get(&word.to_lowercase()).copied()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_of_market_words() {
        let lexicon = FinancialLexicon::new();

        assert!(lexicon.get_score("soared").unwrap() > 0.5);
        assert!(lexicon.get_score("Plunged").unwrap() < -0.5);
        assert!(lexicon.get_score("quarter").is_none());
        assert_eq!(lexicon.get_score("EARNINGS"), lexicon.get_score("earnings"));
    }

    #[test]
    fn test_modifiers_and_negations() {
        let lexicon = FinancialLexicon::new();

        assert!(lexicon.get_modifier("sharply").unwrap() > 1.0);
        assert!(lexicon.get_modifier("slightly").unwrap() < 1.0);
        assert!(lexicon.is_negation("didn't"));
        assert!(!lexicon.is_negation("rally"));
    }

    #[test]
    fn test_add_word_clamps() {
        let mut lexicon = FinancialLexicon::new();
        let before = lexicon.len();

        lexicon.add_word("Moonshot", 3.0);

        assert_eq!(lexicon.len(), before + 1);
        assert_eq!(lexicon.get_score("moonshot"), Some(1.0));
    }
}
