// tests/logger_file.rs

// The `log` facade holds one logger per process, so this file keeps a single
// test that owns it.

use projtree::core::logger::{AppLogger, log_file_name};
use regex::Regex;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_records_reach_the_log_file() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");
    fs::create_dir_all(&log_dir).unwrap();
    let log_path = log_dir.join(log_file_name("demo", "run", "log"));
    fs::write(&log_path, "2026-01-01 00:00:00 [INFO] earlier run\n").unwrap();

    let logger = AppLogger::init(&log_dir, "demo", "run", "log", Some(dir.path())).unwrap();
    assert!(logger.installed());
    assert_eq!(logger.log_path(), log_path.as_path());

    logger.info("hello world");
    logger.warning("héllo wörld");
    log::logger().flush();

    let content = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.first(), Some(&"2026-01-01 00:00:00 [INFO] earlier run"));

    let line = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} \[(INFO|WARN)\] (.+)$").unwrap();
    let messages: Vec<String> = lines
        .iter()
        .skip(1)
        .map(|l| {
            let caps = line.captures(l).unwrap();
            format!("{} {}", &caps[1], &caps[2])
        })
        .collect();
    assert_eq!(
        messages,
        vec![
            format!("INFO Logger initialized: {}", log_path.display()),
            "INFO hello world".to_string(),
            "WARN héllo wörld".to_string(),
        ]
    );
}
