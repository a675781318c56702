pub mod config;
pub mod detector;
pub mod history;
pub mod keywords;
pub mod report;
pub mod samples;
pub mod scanner;
pub mod segmenter;
pub mod text;

pub use config::Config;
pub use detector::{detect_phishing, DetectionDetails, DetectionResult, PhishingDetector, RiskLevel};
pub use history::{HistoryEntry, HistoryStatus, HistoryStore};
pub use scanner::{ScanError, ScanOutcome, Scanner};
pub use segmenter::{safe_sentence_split, SegmenterKind, SentenceSegmenter};
