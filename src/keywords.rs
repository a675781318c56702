use std::io::ErrorKind;
use std::path::Path;

/// Load suspicious phrases, one per line.
///
/// Lines are trimmed and lowercased; blank lines are skipped and file order is
/// kept. Duplicates are left in place since phrase matching collapses them.
/// A missing or unreadable file yields an empty list.
pub fn load_keywords<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => parse_keywords(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Keyword file not found: {}", path.display());
            Vec::new()
        }
        Err(e) => {
            log::warn!("Failed to read keyword file {}: {e}", path.display());
            Vec::new()
        }
    }
}

pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}
