use crate::detector::{DetectionDetails, DetectionResult, RiskLevel};
use anyhow::{Context, Result};
use chrono::Local;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub const DEFAULT_PREVIEW_CHARS: usize = 240;
const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub risk_level: RiskLevel,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub summary: HistorySummary,
    pub keywords: Vec<String>,
    pub urls: Vec<String>,
    pub sentences: Vec<String>,
    pub details: DetectionDetails,
    pub preview: String,
}

impl HistoryEntry {
    pub fn from_result(result: &DetectionResult, text: &str, preview_chars: usize) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            summary: HistorySummary {
                risk_level: result.risk_level(),
                score: result.score(),
            },
            keywords: result.flagged_keywords().to_vec(),
            urls: result.suspicious_urls().to_vec(),
            sentences: result.suspicious_sentences().to_vec(),
            details: *result.details(),
            preview: make_preview(text, preview_chars),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStatus {
    Saved,
    Unavailable,
    Disabled,
}

/// First `limit` characters of `text`, with a marker appended when cut.
pub fn make_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Append-only scan log stored as a single JSON array.
///
/// Every append reads the whole array, pushes one entry and rewrites the file
/// through a uniquely named temporary sibling, so a failed write leaves the
/// previous log intact.
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log. Missing or unparseable content reads as empty.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read history {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "History file {} is malformed, treating as empty: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Append one entry. Writers in this process are serialised by the mutex,
    /// writers in other processes by an exclusive lock on `<log>.lock`.
    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create history directory: {}", dir.display()))?;

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

        let mut entries = self.load();
        entries.push(entry);
        let content = serde_json::to_string_pretty(&entries)?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        // Released on drop as well; explicit so the log is complete before returning
        FileExt::unlock(&lock_file)?;
        Ok(())
    }

    /// Best-effort append; errors are logged and never reach the caller.
    pub fn record(&self, result: &DetectionResult, text: &str, preview_chars: usize) -> HistoryStatus {
        let entry = HistoryEntry::from_result(result, text, preview_chars);
        match self.append(entry) {
            Ok(()) => HistoryStatus::Saved,
            Err(e) => {
                log::warn!("History unavailable: {e:#}");
                HistoryStatus::Unavailable
            }
        }
    }
}
