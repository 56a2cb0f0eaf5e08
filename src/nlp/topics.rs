//! Key topic extraction from proper-noun phrases.
//!
//! A topic is a run of capitalized words inside one sentence, for example
//! "Federal Reserve", "Tesla Inc" or "Model 3". Each run is classified with a
//! few small word lists:
//!
//! - organizations: corporate suffixes and acronyms;
//! - places: countries, regions and financial centres;
//! - groups: nationalities;
//! - products: everything else that survives filtering.
//!
//! Classified topics are returned ahead of unclassified ones, each group in
//! order of first appearance.

use crate::nlp::tokenizer::split_sentences;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lowercase words allowed inside a phrase ("Bank of America").
const CONNECTORS: &[&str] = &["of", "&", "de", "for", "the"];

const ARTICLES: &[&str] = &["the", "a", "an", "this"];

/// Determiners and pronouns commonly capitalized at sentence start.
const LEADING_STOPWORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "its", "it", "his", "her", "their", "our",
    "we", "they", "he", "she", "i", "in", "on", "at", "for", "but", "and", "or", "as", "after",
    "before", "while", "when", "if", "so", "yet", "meanwhile", "however", "also", "still", "shares",
    "analysts", "investors", "sales", "revenue", "stocks", "why", "how", "what", "here", "there",
];

const CALENDAR_WORDS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december", "today", "yesterday", "tomorrow",
];

/// Job titles and acronyms that are capitalized but never topics.
const NON_TOPIC_WORDS: &[&str] = &[
    "ceo", "cfo", "coo", "cto", "chairman", "president", "chief", "executive", "officer", "ai",
    "ev", "evs", "ipo", "q1", "q2", "q3", "q4", "eps", "yoy", "us", "ok", "tv", "pm", "am",
];

const PERSON_TITLES: &[&str] = &["mr", "mrs", "ms", "dr", "sir", "dame", "prof", "lord"];

const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "co", "company", "ltd", "llc", "plc", "ag", "sa", "nv", "gmbh",
    "group", "holdings", "bank", "motors", "technologies", "systems", "airlines", "partners",
    "capital", "fund", "exchange", "commission", "reserve", "association", "agency", "ministry",
    "authority", "institute", "university", "labs", "industries", "energy", "pharmaceuticals",
    "securities", "investments", "financial", "insurance", "media", "entertainment",
];

const PLACES: &[&str] = &[
    "united states", "america", "usa", "u.s", "u.s.", "china", "japan", "germany", "france",
    "india", "united kingdom", "britain", "uk", "u.k", "u.k.", "canada", "mexico", "brazil",
    "russia", "ukraine", "italy", "spain", "south korea", "korea", "taiwan", "australia",
    "europe", "asia", "africa", "middle east", "latin america", "european union", "eu",
    "switzerland", "netherlands", "sweden", "norway", "singapore", "hong kong", "israel",
    "saudi arabia", "turkey", "indonesia", "vietnam", "new york", "london", "tokyo", "beijing",
    "shanghai", "shenzhen", "paris", "berlin", "frankfurt", "washington", "california", "texas",
    "silicon valley", "wall street", "detroit", "seattle", "mumbai", "delhi", "toronto",
];

const GROUPS: &[&str] = &[
    "american", "americans", "chinese", "japanese", "german", "germans", "french", "indian",
    "indians", "british", "canadian", "mexican", "brazilian", "russian", "russians",
    "ukrainian", "italian", "spanish", "korean", "taiwanese", "australian", "european",
    "europeans", "asian", "african", "swiss", "dutch", "swedish", "israeli", "saudi",
    "republican", "republicans", "democrat", "democrats", "democratic",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicKind {
    Organization,
    Place,
    Group,
    Product,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub kind: Option<TopicKind>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicExtractor;

impl TopicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Up to `max_topics` distinct topic strings.
    pub fn extract(&self, text: &str, max_topics: usize) -> Vec<String> {
        let topics = self.candidates(text);
        let (classified, unclassified): (Vec<_>, Vec<_>) =
            topics.into_iter().partition(|t| t.kind.is_some());

        classified
            .into_iter()
            .chain(unclassified)
            .map(|t| t.text)
            .take(max_topics)
            .collect()
    }

    /// Every distinct topic phrase in order of first appearance.
    pub fn candidates(&self, text: &str) -> Vec<Topic> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();

        for sentence in split_sentences(text) {
            for phrase in phrases(&sentence) {
                let key = phrase.to_lowercase();
                if seen.insert(key) {
                    let kind = classify(&phrase);
                    topics.push(Topic { text: phrase, kind });
                }
            }
        }

        topics
    }
}

fn phrases(sentence: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_starts_sentence = false;

    for (idx, raw) in sentence.split_whitespace().enumerate() {
        let word = clean_word(raw);
        let breaks_after = ends_phrase(raw);

        if word.is_empty() {
            flush(&mut found, &mut current, current_starts_sentence);
            continue;
        }

        let continues = !current.is_empty()
            && (CONNECTORS.contains(&word.as_str())
                || word.chars().all(|c| c.is_ascii_digit()));

        if is_proper(&word) || continues {
            if current.is_empty() {
                current_starts_sentence = idx == 0;
            }
            current.push(word);
        } else {
            flush(&mut found, &mut current, current_starts_sentence);
        }

        if breaks_after {
            flush(&mut found, &mut current, current_starts_sentence);
        }
    }
    flush(&mut found, &mut current, current_starts_sentence);

    found
}

fn flush(found: &mut Vec<String>, current: &mut Vec<String>, starts_sentence: bool) {
    let mut words = std::mem::take(current);

    // a title marks the phrase as a person's name
    if words
        .first()
        .is_some_and(|w| PERSON_TITLES.contains(&w.trim_end_matches('.').to_lowercase().as_str()))
    {
        return;
    }

    while words
        .last()
        .is_some_and(|w| CONNECTORS.contains(&w.to_lowercase().as_str()))
    {
        words.pop();
    }

    let mut skip = 0;
    while skip < words.len() {
        let lower = words[skip].to_lowercase();
        let is_stop = CONNECTORS.contains(&lower.as_str())
            || (starts_sentence && skip == 0 && LEADING_STOPWORDS.contains(&lower.as_str()))
            || ARTICLES.contains(&lower.as_str());
        if is_stop {
            skip += 1;
        } else {
            break;
        }
    }
    let words = &words[skip..];

    if words.is_empty() {
        return;
    }

    let all_filtered = words.iter().all(|w| {
        let lower = w.to_lowercase();
        CALENDAR_WORDS.contains(&lower.as_str()) || NON_TOPIC_WORDS.contains(&lower.as_str())
    });
    if all_filtered {
        return;
    }

    found.push(words.join(" "));
}

fn clean_word(raw: &str) -> String {
    let trimmed = raw
        .trim_start_matches(|c: char| !(c.is_alphanumeric() || c == '&'))
        .trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '&' || c == '.'));

    let trimmed = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .unwrap_or(trimmed);

    // "U.S." keeps its periods, "Corp." and a final full stop do not
    let trimmed = if trimmed.ends_with('.') && !keeps_period(trimmed) {
        trimmed.trim_end_matches('.')
    } else {
        trimmed
    };

    trimmed.to_string()
}

fn keeps_period(word: &str) -> bool {
    let inner = word.trim_end_matches('.');
    inner.contains('.')
}

fn ends_phrase(raw: &str) -> bool {
    let tail = raw.trim_end_matches(['"', '\u{201D}', ')']);
    if tail.len() != raw.len() || tail.ends_with([',', ';', ':', '!', '?']) {
        return true;
    }
    // possessives close the phrase: "Apple's iPhone" is two topics
    if tail.ends_with("'s") || tail.ends_with("\u{2019}s") {
        return true;
    }
    if tail.ends_with('.') {
        let word = tail.trim_end_matches('.');
        if keeps_period(word) {
            return false;
        }
        let lower = word.to_lowercase();
        return !(ORG_SUFFIXES.contains(&lower.as_str()) || PERSON_TITLES.contains(&lower.as_str()));
    }
    false
}

fn is_proper(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => true,
        // camel-cased brands such as "iPhone" or "eBay"
        Some(first) if first.is_lowercase() => chars.any(|c| c.is_uppercase()),
        _ => false,
    }
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn classify(phrase: &str) -> Option<TopicKind> {
    let lower = phrase.to_lowercase();

    if PLACES.contains(&lower.as_str()) {
        return Some(TopicKind::Place);
    }
    if GROUPS.contains(&lower.as_str()) {
        return Some(TopicKind::Group);
    }

    let last = lower
        .rsplit(' ')
        .next()
        .unwrap_or("")
        .trim_end_matches('.');
    if ORG_SUFFIXES.contains(&last) || (!phrase.contains(' ') && is_acronym(phrase)) {
        return Some(TopicKind::Organization);
    }
    // "Bank of America", "University of Michigan"
    let first = lower.split(' ').next().unwrap_or("");
    if lower.contains(" of ") && ORG_SUFFIXES.contains(&first) {
        return Some(TopicKind::Organization);
    }

    if phrase.split(' ').any(|w| {
        w.chars().all(|c| c.is_ascii_digit()) || (is_proper(w) && !w.starts_with(char::is_uppercase))
    }) {
        return Some(TopicKind::Product);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(String, Option<TopicKind>)> {
        TopicExtractor::new()
            .candidates(text)
            .into_iter()
            .map(|t| (t.text, t.kind))
            .collect()
    }

    #[test]
    fn test_extracts_multiword_organizations() {
        let topics = kinds("Shares of Bank of America and Goldman Sachs Group rose on Monday.");
        assert_eq!(
            topics,
            vec![
                ("Bank of America".to_string(), Some(TopicKind::Organization)),
                ("Goldman Sachs Group".to_string(), Some(TopicKind::Organization)),
            ]
        );
    }

    #[test]
    fn test_classifies_places_groups_and_products() {
        let topics = kinds("Tesla said Model 3 demand in China was strong, lifting European suppliers.");
        assert!(topics.contains(&("China".to_string(), Some(TopicKind::Place))));
        assert!(topics.contains(&("European".to_string(), Some(TopicKind::Group))));
        assert!(topics.contains(&("Model 3".to_string(), Some(TopicKind::Product))));
        assert!(topics.contains(&("Tesla".to_string(), None)));
    }

    #[test]
    fn test_acronyms_are_organizations() {
        let topics = kinds("The SEC opened a probe, the CEO said.");
        assert_eq!(topics, vec![("SEC".to_string(), Some(TopicKind::Organization))]);
    }

    #[test]
    fn test_sentence_start_stopwords_and_calendar_words_are_dropped() {
        let topics = kinds("The results arrived Tuesday. However, analysts were calm.");
        assert!(topics.is_empty(), "unexpected topics: {topics:?}");
    }

    #[test]
    fn test_person_titles_drop_phrase() {
        let topics = kinds("Mr. Smith joined Acme Corp. last year.");
        assert_eq!(topics, vec![("Acme Corp".to_string(), Some(TopicKind::Organization))]);
    }

    #[test]
    fn test_possessive_and_duplicates() {
        let topics = kinds("Apple's iPhone sales rose. APPLE shares followed as Apple gained.");
        let texts: Vec<_> = topics.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["Apple", "iPhone"]);
    }

    #[test]
    fn test_extract_orders_classified_first_and_truncates() {
        let extractor = TopicExtractor::new();
        let text = "Rivian and Lucid lagged while Ford Motors and Toyota Motors gained in Japan.";

        let topics = extractor.extract(text, 3);
        assert_eq!(topics, vec!["Ford Motors", "Toyota Motors", "Japan"]);

        let all = extractor.extract(text, 10);
        assert_eq!(all, vec!["Ford Motors", "Toyota Motors", "Japan", "Rivian", "Lucid"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(TopicExtractor::new().extract("", 5).is_empty());
    }
}
