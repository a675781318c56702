use securemail::segmenter::PunctuationSegmenter;
use securemail::{detect_phishing, PhishingDetector, RiskLevel, SegmenterKind};
use std::path::Path;
use tempfile::tempdir;

fn write_keywords(dir: &Path, lines: &str) -> std::path::PathBuf {
    let path = dir.join("suspicious_keywords.txt");
    std::fs::write(&path, lines).unwrap();
    path
}

#[test]
fn test_empty_input_scores_zero() {
    let dir = tempdir().unwrap();
    let keywords = write_keywords(dir.path(), "urgent\nclick here\n");
    let detector = PhishingDetector::with_kind(keywords, SegmenterKind::Unicode);

    let result = detector.detect("");
    assert_eq!(result.score(), 0);
    assert_eq!(result.risk_level(), RiskLevel::Low);
    assert!(!result.is_phishing());
    assert!(result.flagged_keywords().is_empty());
    assert!(result.suspicious_urls().is_empty());
    assert!(result.suspicious_sentences().is_empty());
}

#[test]
fn test_single_hyphenated_login_url_is_phishing() {
    let dir = tempdir().unwrap();
    let keywords = write_keywords(dir.path(), "wire transfer\n");
    let detector = PhishingDetector::with_kind(keywords, SegmenterKind::Unicode);

    let result = detector.detect("Please check http://secure-login-update.com");
    assert!(result.flagged_keywords().is_empty());
    assert_eq!(result.suspicious_urls(), &["http://secure-login-update.com"]);
    assert!(result.score() >= 18);
    assert!(result.is_phishing());
}

#[test]
fn test_repeated_keyword_in_one_sentence() {
    let dir = tempdir().unwrap();
    let keywords = write_keywords(dir.path(), "verify your account\nverify your account\n");
    let detector = PhishingDetector::with_kind(keywords, SegmenterKind::Punctuation);

    let text = "Please verify your account, verify your account, and verify your account today.";
    let result = detector.detect(text);
    assert_eq!(result.flagged_keywords(), &["verify your account"]);
    assert_eq!(result.suspicious_sentences(), &[text]);
    assert_eq!(result.score(), 14);
}

#[test]
fn test_shouting_contributions_are_capped() {
    let dir = tempdir().unwrap();
    let keywords = write_keywords(dir.path(), "gift card\n");
    let detector = PhishingDetector::with_kind(keywords, SegmenterKind::Punctuation);

    let text = "ONE TWO SIX TEN ACT NOW YES WOW BIG DEAL HOT BUY !!!!!!!!!!!!";
    let result = detector.detect(text);
    assert_eq!(result.details().all_caps_words, 12);
    assert_eq!(result.details().exclamation_marks, 12);
    // Capped at 2 * 10 + 1.5 * 10, below the Medium threshold
    assert_eq!(result.score(), 35);
    assert_eq!(result.risk_level(), RiskLevel::Low);
    assert!(!result.is_phishing());
}

#[test]
fn test_missing_keyword_resource_still_scores() {
    let dir = tempdir().unwrap();
    let detector = PhishingDetector::with_kind(dir.path().join("absent.txt"), SegmenterKind::Unicode);

    let result = detector.detect("URGENT!!! Log in at http://verify-now.test/@home");
    assert!(result.flagged_keywords().is_empty());
    assert!(result.suspicious_sentences().is_empty());
    assert_eq!(result.suspicious_urls().len(), 1);
    // 18 + 2 + 4.5 rounds to 24
    assert_eq!(result.score(), 24);
    assert!(result.is_phishing());
}

#[test]
fn test_detection_is_deterministic() {
    let dir = tempdir().unwrap();
    let keywords = write_keywords(dir.path(), "urgent\nsecurity alert\n");
    let detector = PhishingDetector::with_kind(keywords, SegmenterKind::Unicode);

    let text = "Security alert! URGENT action needed at https://xn--bnk-sla.test now.";
    assert_eq!(detector.detect(text), detector.detect(text));
}

#[test]
fn test_score_bounds_and_tier_consistency() {
    let keywords: Vec<String> = ["urgent", "click here", "password"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let inputs = [
        "",
        "   \n\t",
        "plain text with nothing notable",
        "urgent urgent urgent. click here! password?",
        "http://a-login.test http://b@c.test http://xn--d.test URGENT!!!! CLICK HERE",
        "Привет! これは テスト です。",
    ];

    for text in inputs {
        let result = detect_phishing(text, &keywords, &PunctuationSegmenter);
        assert!(result.score() <= 100);
        assert_eq!(result.risk_level(), RiskLevel::from_score(result.score()));
        if !result.suspicious_urls().is_empty() {
            assert!(result.is_phishing());
        }
    }
}

#[test]
fn test_bundled_resources_flag_default_sample() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let detector = PhishingDetector::with_kind(
        data.join("suspicious_keywords.txt"),
        SegmenterKind::Punctuation,
    );

    let result = detector.detect(securemail::samples::DEFAULT_SAMPLE_BODY);
    assert!(result.is_phishing());
    assert!(result
        .flagged_keywords()
        .iter()
        .any(|k| k == "suspicious activity"));
    assert_eq!(result.suspicious_urls(), &["http://secure-login-update.com"]);
}

#[test]
fn test_default_segmenter_matches_punctuation_on_multiline_email() {
    let keywords = securemail::keywords::load_keywords(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/suspicious_keywords.txt"),
    );
    let body = securemail::samples::DEFAULT_SAMPLE_BODY;

    let unicode = detect_phishing(body, &keywords, SegmenterKind::Unicode.build().as_ref());
    let punctuation = detect_phishing(body, &keywords, &PunctuationSegmenter);

    assert_eq!(unicode.suspicious_sentences(), punctuation.suspicious_sentences());
    assert_eq!(unicode.suspicious_sentences().len(), 2);
    assert_eq!(unicode.score(), punctuation.score());
}

#[test]
fn test_unterminated_lines_form_one_sentence() {
    let keywords = vec!["urgent".to_string()];
    let text = "urgent reply needed\nurgent call back\nurgent notice\nurgent";
    let result = detect_phishing(text, &keywords, SegmenterKind::Unicode.build().as_ref());
    assert_eq!(result.details().sentence_hits, 1);
    assert_eq!(result.score(), 14);
}
