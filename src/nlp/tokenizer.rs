//! Word and sentence splitting for English news text.

/// Words ending in a period that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "inc", "corp", "co", "ltd", "llc", "plc", "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st",
    "vs", "etc", "e.g", "i.e", "u.s", "u.k", "u.n", "e.u", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec", "no", "approx", "est", "dept", "gov",
];

#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercased word tokens. Apostrophes inside words are kept so that
    /// negations like "didn't" survive; typographic apostrophes are folded
    /// to ASCII.
    pub fn words(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
            .map(|w| w.replace('\u{2019}', "'"))
            .map(|w| w.trim_matches('\'').to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }
}

/// Splits text into trimmed sentences. Line breaks always end a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut start = 0;
        let mut iter = line.char_indices().peekable();

        while let Some((idx, c)) = iter.next() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }

            // absorb runs like "?!" or "..." and closing quotes/brackets
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = iter.peek() {
                if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}') {
                    end = next_idx + next.len_utf8();
                    iter.next();
                } else {
                    break;
                }
            }

            let rest = &line[end..];
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                continue;
            }
            if c == '.' && is_abbreviation(&line[start..idx]) {
                continue;
            }
            if rest
                .trim_start()
                .chars()
                .next()
                .is_some_and(|n| n.is_lowercase())
            {
                continue;
            }

            push_trimmed(&mut sentences, &line[start..end]);
            start = end;
        }

        push_trimmed(&mut sentences, &line[start..]);
    }

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

// `before` is the sentence text up to (not including) the period
fn is_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
        .next()
        .unwrap_or("");
    if word.is_empty() {
        return false;
    }
    let lowered = word.to_lowercase();
    if ABBREVIATIONS.contains(&lowered.as_str()) {
        return true;
    }
    // single initials such as "J." in "J. P. Morgan"
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_uppercase())
}
