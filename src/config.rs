use crate::history::DEFAULT_PREVIEW_CHARS;
use crate::segmenter::SegmenterKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: String,
    pub keywords_file: String,
    pub samples_file: String,
    pub history_file: String,
    pub reports_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DetectionConfig {
    #[serde(default)]
    pub segmenter: SegmenterKind,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_history_enabled")]
    pub enabled: bool,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_history_enabled() -> bool {
    true
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            keywords_file: "suspicious_keywords.txt".to_string(),
            samples_file: "samples.json".to_string(),
            history_file: "history.json".to_string(),
            reports_dir: "reports".to_string(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_history_enabled(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl PathsConfig {
    /// Relative names live under `data_dir`; absolute paths are used as given.
    pub fn data_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.data_dir).join(path)
        }
    }

    pub fn keywords_path(&self) -> PathBuf {
        self.data_path(&self.keywords_file)
    }

    pub fn samples_path(&self) -> PathBuf {
        self.data_path(&self.samples_file)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_path(&self.history_file)
    }

    pub fn reports_dir(&self) -> PathBuf {
        PathBuf::from(&self.reports_dir)
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
