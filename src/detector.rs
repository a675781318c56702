use crate::keywords::load_keywords;
use crate::segmenter::{SegmenterKind, SentenceSegmenter};
use crate::text::{count_all_caps_words, count_exclamations, extract_urls, find_suspicious_phrases};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const KEYWORD_WEIGHT: f64 = 8.0;
pub const URL_WEIGHT: f64 = 18.0;
pub const SENTENCE_WEIGHT: f64 = 6.0;
pub const CAPS_WEIGHT: f64 = 2.0;
pub const EXCLAMATION_WEIGHT: f64 = 1.5;
/// Caps words and exclamation marks stop counting past this many.
pub const SHOUTING_CAP: usize = 10;

pub const HIGH_THRESHOLD: u8 = 70;
pub const MEDIUM_THRESHOLD: u8 = 40;

const URL_ACTION_WORDS: [&str; 3] = ["login", "verify", "secure"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= HIGH_THRESHOLD => RiskLevel::High,
            s if s >= MEDIUM_THRESHOLD => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionDetails {
    pub all_caps_words: usize,
    pub exclamation_marks: usize,
    /// All extracted URLs, suspicious or not.
    pub url_count: usize,
    pub keyword_count: usize,
    pub sentence_hits: usize,
}

impl DetectionDetails {
    pub fn entries(&self) -> [(&'static str, usize); 5] {
        [
            ("all_caps_words", self.all_caps_words),
            ("exclamation_marks", self.exclamation_marks),
            ("url_count", self.url_count),
            ("keyword_count", self.keyword_count),
            ("sentence_hits", self.sentence_hits),
        ]
    }
}

/// Outcome of one scan. Built once by [`detect_phishing`]; the score-derived
/// fields cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    flagged_keywords: Vec<String>,
    suspicious_urls: Vec<String>,
    suspicious_sentences: Vec<String>,
    score: u8,
    risk_level: RiskLevel,
    is_phishing: bool,
    details: DetectionDetails,
}

impl DetectionResult {
    fn new(
        flagged_keywords: Vec<String>,
        suspicious_urls: Vec<String>,
        suspicious_sentences: Vec<String>,
        caps_count: usize,
        exclamations: usize,
        url_count: usize,
    ) -> Self {
        let raw = flagged_keywords.len() as f64 * KEYWORD_WEIGHT
            + suspicious_urls.len() as f64 * URL_WEIGHT
            + suspicious_sentences.len() as f64 * SENTENCE_WEIGHT
            + caps_count.min(SHOUTING_CAP) as f64 * CAPS_WEIGHT
            + exclamations.min(SHOUTING_CAP) as f64 * EXCLAMATION_WEIGHT;
        let score = score_from_raw(raw);

        let details = DetectionDetails {
            all_caps_words: caps_count,
            exclamation_marks: exclamations,
            url_count,
            keyword_count: flagged_keywords.len(),
            sentence_hits: suspicious_sentences.len(),
        };

        // A single suspicious URL is enough for a positive verdict
        let is_phishing = score >= MEDIUM_THRESHOLD || !suspicious_urls.is_empty();

        Self {
            flagged_keywords,
            suspicious_urls,
            suspicious_sentences,
            score,
            risk_level: RiskLevel::from_score(score),
            is_phishing,
            details,
        }
    }

    pub fn flagged_keywords(&self) -> &[String] {
        &self.flagged_keywords
    }

    pub fn suspicious_urls(&self) -> &[String] {
        &self.suspicious_urls
    }

    pub fn suspicious_sentences(&self) -> &[String] {
        &self.suspicious_sentences
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn is_phishing(&self) -> bool {
        self.is_phishing
    }

    pub fn details(&self) -> &DetectionDetails {
        &self.details
    }
}

/// Clamp to [0, 100] and round half to even.
fn score_from_raw(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round_ties_even() as u8
}

pub fn is_suspicious_url(url: &str, keywords: &[String]) -> bool {
    let url_lower = url.to_lowercase();

    if keywords
        .iter()
        .any(|kw| !kw.is_empty() && url_lower.contains(kw.as_str()))
    {
        return true;
    }

    // Punycode hosts and credential-embedding tricks
    if url_lower.contains("xn--") || url_lower.contains('@') {
        return true;
    }

    url_lower.contains('-') && URL_ACTION_WORDS.iter().any(|w| url_lower.contains(w))
}

/// Score `text` against `keywords`.
pub fn detect_phishing(
    text: &str,
    keywords: &[String],
    segmenter: &dyn SentenceSegmenter,
) -> DetectionResult {
    let text_lower = text.to_lowercase();

    let flagged_keywords = find_suspicious_phrases(&text_lower, keywords);

    let urls = extract_urls(text);
    let suspicious_urls: Vec<String> = urls
        .iter()
        .filter(|url| is_suspicious_url(url, keywords))
        .cloned()
        .collect();

    let suspicious_sentences: Vec<String> = segmenter
        .split(text)
        .into_iter()
        .filter(|sentence| {
            let sentence_lower = sentence.to_lowercase();
            keywords
                .iter()
                .any(|kw| !kw.is_empty() && sentence_lower.contains(kw.as_str()))
        })
        .map(|sentence| sentence.trim().to_string())
        .collect();

    let caps_count = count_all_caps_words(text);
    let exclamations = count_exclamations(text);

    log::debug!(
        "Signals: {} keywords, {}/{} suspicious urls, {} sentences, {} caps words, {} exclamations",
        flagged_keywords.len(),
        suspicious_urls.len(),
        urls.len(),
        suspicious_sentences.len(),
        caps_count,
        exclamations
    );

    DetectionResult::new(
        flagged_keywords,
        suspicious_urls,
        suspicious_sentences,
        caps_count,
        exclamations,
        urls.len(),
    )
}

/// Detection engine bound to a keyword file and a sentence segmenter.
/// Keywords are reloaded on every call.
pub struct PhishingDetector {
    keywords_path: PathBuf,
    segmenter: Box<dyn SentenceSegmenter>,
}

impl PhishingDetector {
    pub fn new(keywords_path: impl Into<PathBuf>, segmenter: Box<dyn SentenceSegmenter>) -> Self {
        Self {
            keywords_path: keywords_path.into(),
            segmenter,
        }
    }

    pub fn with_kind(keywords_path: impl Into<PathBuf>, kind: SegmenterKind) -> Self {
        Self::new(keywords_path, kind.build())
    }

    pub fn segmenter_name(&self) -> &str {
        self.segmenter.name()
    }

    pub fn detect(&self, text: &str) -> DetectionResult {
        let keywords = load_keywords(&self.keywords_path);
        detect_phishing(text, &keywords, self.segmenter.as_ref())
    }
}
