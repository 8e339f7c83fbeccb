// tests/runlog.rs
//
// The logger is process-global, so everything that installs it lives in one test.
use std::fs;

use kw_trends::config::file::apply_text;
use kw_trends::config::RunConfig;
use kw_trends::runlog::{self, format_line};
use log::Level;
use time::UtcOffset;

#[test]
fn config_warnings_reach_the_log_file_set_later() {
    let dir = tempfile::tempdir().unwrap();
    runlog::install(UtcOffset::UTC, false);

    let mut cfg = RunConfig::default();
    apply_text(&mut cfg, "mystery = 1\nno equals sign\n").unwrap();
    log::debug!("below the level");

    let first = dir.path().join("out").join("log_2024-06-01.txt");
    runlog::set_file(&first);
    log::info!("Run: begin");

    let text = fs::read_to_string(&first).unwrap();
    let warn = text.find("WARN: Config: unknown key \"mystery\"").unwrap();
    assert!(text.contains("WARN: Config: ignoring line without '=': no equals sign"));
    assert!(warn < text.find("Run: begin").unwrap());
    assert!(!text.contains("below the level"));

    let second = dir.path().join("out").join("log_2024-06-02.txt");
    runlog::set_file(&second);
    log::info!("next day");
    let text = fs::read_to_string(&second).unwrap();
    assert!(text.contains("next day"));
    assert!(!text.contains("mystery"));
}

#[test]
fn line_format() {
    assert_eq!(format_line("2024-06-01 09:00:00", Level::Info, "hi"), "[2024-06-01 09:00:00] hi\n");
    assert_eq!(format_line("t", Level::Warn, "careful"), "[t] WARN: careful\n");
    assert_eq!(format_line("t", Level::Error, "boom"), "[t] ERROR: boom\n");
}
