use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Splits text into sentences. Implementations return sentences in document
/// order and never trim them.
pub trait SentenceSegmenter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
    fn name(&self) -> &str;
}

/// UAX #29 sentence boundaries, keeping only breaks that follow a sentence
/// terminator. Bare line breaks do not end a sentence; such segments are
/// joined onto the next one.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for segment in text.split_sentence_bounds() {
            pending.push_str(segment);
            if ends_with_terminator(segment) {
                sentences.push(std::mem::take(&mut pending));
            }
        }
        if !pending.is_empty() {
            sentences.push(pending);
        }

        sentences
    }

    fn name(&self) -> &str {
        "unicode"
    }
}

fn ends_with_terminator(segment: &str) -> bool {
    segment
        .trim_end()
        .trim_end_matches(|c: char| matches!(c, '"' | '\'' | ')' | ']' | '”' | '’'))
        .ends_with(|c: char| matches!(c, '.' | '!' | '?' | '。' | '！' | '？'))
}

/// Splits on whitespace that directly follows `.`, `!` or `?`. The terminator
/// stays with the preceding sentence and the whitespace is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PunctuationSegmenter;

impl SentenceSegmenter for PunctuationSegmenter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in SENTENCE_END.find_iter(text) {
            // Terminators are single-byte ASCII
            let end = m.start() + 1;
            sentences.push(text[start..end].to_string());
            start = m.end();
        }
        sentences.push(text[start..].to_string());

        sentences
    }

    fn name(&self) -> &str {
        "punctuation"
    }
}

/// Runs `primary`, using `fallback` whenever the primary produces nothing for
/// non-blank input.
pub struct FallbackSegmenter {
    primary: Box<dyn SentenceSegmenter>,
    fallback: Box<dyn SentenceSegmenter>,
}

impl FallbackSegmenter {
    pub fn new(primary: Box<dyn SentenceSegmenter>, fallback: Box<dyn SentenceSegmenter>) -> Self {
        Self { primary, fallback }
    }
}

impl SentenceSegmenter for FallbackSegmenter {
    fn split(&self, text: &str) -> Vec<String> {
        let sentences = self.primary.split(text);
        if sentences.is_empty() && !text.trim().is_empty() {
            log::debug!(
                "Segmenter '{}' produced no sentences, falling back to '{}'",
                self.primary.name(),
                self.fallback.name()
            );
            return self.fallback.split(text);
        }
        sentences
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    #[default]
    Unicode,
    Punctuation,
}

impl SegmenterKind {
    pub fn build(self) -> Box<dyn SentenceSegmenter> {
        match self {
            SegmenterKind::Unicode => Box::new(FallbackSegmenter::new(
                Box::new(UnicodeSegmenter),
                Box::new(PunctuationSegmenter),
            )),
            SegmenterKind::Punctuation => Box::new(PunctuationSegmenter),
        }
    }
}

/// Split with the linguistic segmenter, falling back to punctuation rules.
pub fn safe_sentence_split(text: &str) -> Vec<String> {
    SegmenterKind::Unicode.build().split(text)
}
