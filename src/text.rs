use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Scheme followed by anything up to whitespace, angle/round/curly brackets or quotes
    static ref URL_REGEX: Regex = Regex::new(r#"(?i)\bhttps?://[^\s<>'"(){}]+"#).unwrap();
    static ref WORD_REGEX: Regex = Regex::new(r"[A-Za-z]+").unwrap();
}

/// Extract every http(s) URL in document order, keeping the original casing.
/// Duplicates are preserved.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count ASCII letter runs longer than two characters that are entirely uppercase.
pub fn count_all_caps_words(text: &str) -> usize {
    WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| word.len() > 2 && word.chars().all(|c| c.is_ascii_uppercase()))
        .count()
}

pub fn count_exclamations(text: &str) -> usize {
    text.matches('!').count()
}

/// Return the phrases that occur in `text` as substrings, in phrase-list order.
///
/// The text is lowercased before matching; phrases are expected to be lowercase
/// already. Each phrase appears at most once in the result, and empty phrases
/// never match.
pub fn find_suspicious_phrases(text: &str, phrases: &[String]) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for phrase in phrases {
        if phrase.is_empty() || !text_lower.contains(phrase.as_str()) {
            continue;
        }
        if seen.insert(phrase.as_str()) {
            found.push(phrase.clone());
        }
    }

    found
}
