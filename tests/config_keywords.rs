// tests/config_keywords.rs
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use kw_trends::config::file::{apply_file, apply_text};
use kw_trends::config::RunConfig;
use kw_trends::history::BaselinePolicy;
use kw_trends::keywords::{default_keywords, parse_list, FileKeywords, KeywordProvider, StaticKeywords};
use kw_trends::TrendError;
use time::macros::date;

#[test]
fn config_text_overrides_defaults() {
    let mut cfg = RunConfig::for_date("data", date!(2024-06-01));
    apply_text(
        &mut cfg,
        "# comment\n\
         out_dir = /tmp/trends\n\
         top_n = 5\n\
         min_count=20\n\
         pause_ms = 0\n\
         baseline = last\n\
         retries = 1\n\
         mystery = ignored\n",
    )
    .unwrap();

    assert_eq!(cfg.out_dir, PathBuf::from("/tmp/trends"));
    assert_eq!(cfg.top_n, 5);
    assert_eq!(cfg.min_count, 20);
    assert_eq!(cfg.pause, Duration::ZERO);
    assert_eq!(cfg.baseline, BaselinePolicy::LastStored);
    assert_eq!(cfg.source.retries, 1);
    assert_eq!(cfg.date, date!(2024-06-01));
}

#[test]
fn bad_config_values_are_errors() {
    let mut cfg = RunConfig::default();
    let err = apply_text(&mut cfg, "top_n = lots\n").unwrap_err();
    assert!(matches!(err, TrendError::Config(_)));

    let err = apply_text(&mut cfg, "utc_offset_hours = 40\n").unwrap_err();
    assert!(matches!(err, TrendError::Config(_)));
}

#[test]
fn config_file_missing_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = RunConfig::default();
    assert!(!apply_file(&mut cfg, &dir.path().join("kw_trends.conf")).unwrap());

    let path = dir.path().join("kw_trends.conf");
    fs::write(&path, "top_n = 3\n").unwrap();
    assert!(apply_file(&mut cfg, &path).unwrap());
    assert_eq!(cfg.top_n, 3);
}

#[test]
fn dated_paths() {
    let cfg = RunConfig::for_date("out", date!(2024-06-01));
    assert_eq!(cfg.history_path(), PathBuf::from("out/daily.csv"));
    assert_eq!(cfg.snapshot_path(), PathBuf::from("out/pchome_keywords_2024-06-01.csv"));
    assert_eq!(cfg.report_path(), PathBuf::from("out/top_risers_2024-06-01.csv"));
    assert_eq!(cfg.log_path(), PathBuf::from("out/log_2024-06-01.txt"));
}

#[test]
fn keyword_list_is_trimmed_and_deduplicated() {
    let list = parse_list("\u{feff}  露營燈 \n\n行動電源\r\n露營燈\n  \n");
    assert_eq!(list, ["露營燈", "行動電源"]);
}

#[test]
fn keyword_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.txt");

    assert_eq!(FileKeywords::new(&path).keywords(), default_keywords());

    fs::write(&path, "\n   \n").unwrap();
    assert_eq!(FileKeywords::new(&path).keywords(), default_keywords());

    fs::write(&path, "tent\nlamp\ntent\n").unwrap();
    assert_eq!(FileKeywords::new(&path).keywords(), ["tent", "lamp"]);
}

#[test]
fn static_keywords_dedupe_and_never_empty() {
    let kws = StaticKeywords(vec!["a".into(), "b".into(), "a".into(), " ".into()]);
    assert_eq!(kws.keywords(), ["a", "b"]);
    assert!(!StaticKeywords(Vec::new()).keywords().is_empty());
}
