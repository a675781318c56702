use crate::detector::DetectionResult;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "scan_report.txt";

/// Render a scan result as the plain-text report shown to the user.
/// Evidence sections are omitted when empty; details always follow in fixed order.
pub fn render_report(result: &DetectionResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Summary: {} risk ({}/100)",
        result.risk_level(),
        result.score()
    ));
    lines.push(String::new());

    push_section(&mut lines, "Keywords detected:", result.flagged_keywords());
    push_section(&mut lines, "Suspicious URLs:", result.suspicious_urls());
    push_section(&mut lines, "Suspicious sentences:", result.suspicious_sentences());

    lines.push("Details:".to_string());
    for (key, value) in result.details().entries() {
        lines.push(format!("  - {key}: {value}"));
    }

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(title.to_string());
    for item in items {
        lines.push(format!("  - {item}"));
    }
    lines.push(String::new());
}

/// Write `text` verbatim to `<reports_dir>/scan_report.txt`, creating the
/// directory when needed.
pub fn save_report(reports_dir: &Path, text: &str) -> Result<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Nothing to save: run a scan before saving a report");
    }

    std::fs::create_dir_all(reports_dir).with_context(|| {
        format!("Failed to create reports directory: {}", reports_dir.display())
    })?;

    let report_path = reports_dir.join(REPORT_FILE_NAME);
    std::fs::write(&report_path, text)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    log::info!("Report saved to {}", report_path.display());
    Ok(report_path)
}
