use clap::{Arg, Command};
use log::LevelFilter;
use securemail::history::HistoryStatus;
use securemail::report::save_report;
use securemail::samples::{find_sample, load_samples, DEFAULT_SAMPLE_BODY};
use securemail::{Config, HistoryStore, ScanError, Scanner};
use std::io::Read;
use std::process;
use std::str::FromStr;

fn main() {
    let matches = Command::new("securemail")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing-risk scanner for email text")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("securemail.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Scan the email text in FILE")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Scan email text read from standard input")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .value_name("TITLE")
                .help("Scan the bundled sample with this title")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("list-samples")
                .long("list-samples")
                .help("List bundled sample emails")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("history")
                .long("history")
                .help("Show previously recorded scans")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save-report")
                .long("save-report")
                .help("Write the scan report to the reports directory")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-history")
                .long("no-history")
                .help("Do not record this scan in the history log")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the detection result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("securemail.yaml");
    let config_exists = std::path::Path::new(config_path).exists();
    let config_result = load_config(config_path, config_exists);

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        config_result
            .as_ref()
            .ok()
            .and_then(|c| c.logging.as_ref())
            .and_then(|l| LevelFilter::from_str(&l.level).ok())
            .unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if !config_exists {
        log::warn!("Configuration file '{config_path}' not found, using default configuration");
    }

    let mut config = match config_result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("list-samples") {
        list_samples(&config);
        return;
    }

    if matches.get_flag("history") {
        show_history(&config);
        return;
    }

    let text = match read_input(&matches, &config) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("no-history") {
        config.history.enabled = false;
    }

    let scanner = Scanner::from_config(&config);
    let outcome = match scanner.scan(&text) {
        Ok(outcome) => outcome,
        Err(ScanError::EmptyInput) => {
            eprintln!("⚠️  {}", ScanError::EmptyInput);
            process::exit(2);
        }
    };

    if matches.get_flag("json") {
        match serde_json::to_string_pretty(&outcome.result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ Failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", outcome.report);
        if outcome.history == HistoryStatus::Unavailable {
            println!();
            println!("(history unavailable)");
        }
    }

    if matches.get_flag("save-report") {
        match save_report(&config.paths.reports_dir(), &outcome.report) {
            Ok(path) => println!("Report saved to: {}", path.display()),
            Err(e) => {
                eprintln!("❌ Save failed: {e:#}");
                process::exit(1);
            }
        }
    }
}

fn load_config(path: &str, exists: bool) -> anyhow::Result<Config> {
    if exists {
        Config::from_file(path)
    } else {
        Ok(Config::default())
    }
}

/// One line per config section, showing the values a user most often edits.
fn config_section_summary(config: &Config) -> Vec<String> {
    vec![
        format!(
            "paths:     keywords {}, history {}",
            config.paths.keywords_path().display(),
            config.paths.history_path().display()
        ),
        format!(
            "detection: segmenter {} (unicode | punctuation)",
            config.detection.segmenter.build().name()
        ),
        format!(
            "history:   {}, preview {} chars",
            if config.history.enabled { "enabled" } else { "disabled" },
            config.history.preview_chars
        ),
        format!(
            "logging:   {}",
            config
                .logging
                .as_ref()
                .map_or("not set, RUST_LOG or --verbose apply", |l| l.level.as_str())
        ),
    ]
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("📝 Wrote default scanner configuration to {path}");
            for line in config_section_summary(&config) {
                println!("   {line}");
            }
        }
        Err(e) => {
            eprintln!("❌ Could not write configuration to {path}: {e:#}");
            process::exit(1);
        }
    }
}

fn read_input(matches: &clap::ArgMatches, config: &Config) -> anyhow::Result<String> {
    if let Some(file) = matches.get_one::<String>("file") {
        return std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("Error reading email file {file}: {e}"));
    }

    if matches.get_flag("stdin") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    let samples = load_samples(config.paths.samples_path());
    if let Some(title) = matches.get_one::<String>("sample") {
        return find_sample(&samples, title)
            .map(|s| s.body.clone())
            .ok_or_else(|| anyhow::anyhow!("Unknown sample: {title}"));
    }

    Ok(samples
        .first()
        .map(|s| s.body.clone())
        .unwrap_or_else(|| DEFAULT_SAMPLE_BODY.to_string()))
}

fn list_samples(config: &Config) {
    let samples = load_samples(config.paths.samples_path());
    if samples.is_empty() {
        println!("No samples available.");
        return;
    }
    for (i, sample) in samples.iter().enumerate() {
        println!("  {}. {}", i + 1, sample.title);
    }
}

fn show_history(config: &Config) {
    let store = HistoryStore::new(config.paths.history_path());
    let entries = store.load();
    if entries.is_empty() {
        println!("No scans recorded.");
        return;
    }

    println!("📜 {} recorded scans ({})", entries.len(), store.path().display());
    for entry in &entries {
        println!(
            "  {}  {:<6} {:>3}/100  {}",
            entry.timestamp,
            entry.summary.risk_level.as_str(),
            entry.summary.score,
            truncate_string(&entry.preview.replace('\n', " "), 60)
        );
    }
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
