use crate::nlp::tokenizer::split_sentences;

const ELLIPSIS: &str = "...";

/// Extractive summary: the first `max_sentences` sentences, cut to at most
/// `max_chars` characters (ellipsis included) on a word boundary when possible.
pub fn summarize(text: &str, max_sentences: usize, max_chars: usize) -> String {
    let sentences = split_sentences(text);
    let lead = sentences
        .iter()
        .take(max_sentences)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(&lead, max_chars)
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let budget = max_chars.saturating_sub(ELLIPSIS.len());
    let cut: String = text.chars().take(budget).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > budget / 2 => &cut[..pos],
        _ => cut.as_str(),
    };

    format!("{}{}", cut.trim_end(), ELLIPSIS)
}
