use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Message used when no sample file is available.
pub const DEFAULT_SAMPLE_BODY: &str = "Dear Customer,\n\n\
We've detected suspicious activity on your account. \
Please verify your information immediately:\n\n\
http://secure-login-update.com\n\n\
Failure to act may result in temporary suspension.\n\n\
Thank you,\nSecurity Team";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub title: String,
    pub body: String,
}

/// Load the sample list. Missing or malformed files yield an empty list.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Vec<Sample> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Samples file not found: {}", path.display());
            return Vec::new();
        }
        Err(e) => {
            log::warn!("Failed to read samples {}: {e}", path.display());
            return Vec::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Samples file {} is malformed: {e}", path.display());
        Vec::new()
    })
}

pub fn find_sample<'a>(samples: &'a [Sample], title: &str) -> Option<&'a Sample> {
    samples.iter().find(|s| s.title == title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_samples_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.json");
        std::fs::write(
            &path,
            r#"[{"title": "Bank alert", "body": "Verify now"}, {"title": "Newsletter", "body": "Hi"}]"#,
        )
        .unwrap();

        let samples = load_samples(&path);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].title, "Bank alert");
        assert_eq!(find_sample(&samples, "Newsletter").unwrap().body, "Hi");
        assert!(find_sample(&samples, "newsletter").is_none());
    }

    #[test]
    fn test_missing_and_malformed_samples() {
        let dir = tempdir().unwrap();
        assert!(load_samples(dir.path().join("missing.json")).is_empty());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"title": "not a list"}"#).unwrap();
        assert!(load_samples(&path).is_empty());
    }

    #[test]
    fn test_bundled_samples_parse() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/samples.json");
        let samples = load_samples(path);
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| !s.title.is_empty() && !s.body.is_empty()));
    }
}
