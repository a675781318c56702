use crate::config::Config;
use crate::detector::{DetectionResult, PhishingDetector};
use crate::history::{HistoryStatus, HistoryStore, DEFAULT_PREVIEW_CHARS};
use crate::report::render_report;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("No content: please enter or load an email to scan")]
    EmptyInput,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub result: DetectionResult,
    pub report: String,
    pub history: HistoryStatus,
}

/// Interactive scan entry point: validates input, runs detection, renders
/// the report and records history.
pub struct Scanner {
    detector: PhishingDetector,
    history: Option<HistoryStore>,
    preview_chars: usize,
}

impl Scanner {
    pub fn new(detector: PhishingDetector, history: Option<HistoryStore>) -> Self {
        Self {
            detector,
            history,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let detector =
            PhishingDetector::with_kind(config.paths.keywords_path(), config.detection.segmenter);
        let history = config
            .history
            .enabled
            .then(|| HistoryStore::new(config.paths.history_path()));

        Self::new(detector, history).with_preview_chars(config.history.preview_chars)
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn detector(&self) -> &PhishingDetector {
        &self.detector
    }

    pub fn history(&self) -> Option<&HistoryStore> {
        self.history.as_ref()
    }

    pub fn scan(&self, raw_text: &str) -> Result<ScanOutcome, ScanError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(ScanError::EmptyInput);
        }

        let result = self.detector.detect(text);
        let report = render_report(&result);
        log::info!(
            "Scan complete: {} risk ({}/100), phishing={}",
            result.risk_level(),
            result.score(),
            result.is_phishing()
        );

        let history = match &self.history {
            Some(store) => store.record(&result, text, self.preview_chars),
            None => HistoryStatus::Disabled,
        };

        Ok(ScanOutcome {
            result,
            report,
            history,
        })
    }
}
