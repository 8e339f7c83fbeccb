// tests/schema_migration.rs
use std::fs;

use kw_trends::history::{self, Layout, SkipReason};
use kw_trends::model::Column;

const BOM: &str = "\u{feff}";

fn body(path: &std::path::Path) -> String {
    let text = fs::read_to_string(path).unwrap();
    text.strip_prefix(BOM).unwrap_or(&text).to_string()
}

#[test]
fn v1_file_is_widened_with_blank_growth() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");
    fs::write(&path, "date,keyword,count,status\n2024-01-01,dress,100,ok\n2024-01-02,dress,0,error: HTTP 503\n").unwrap();

    let report = history::migrate(&path).unwrap();
    assert_eq!(report.from, Layout::V1);
    assert!(report.rewritten);
    assert_eq!(report.rows, 2);
    assert!(report.skipped.is_empty());

    assert_eq!(
        body(&path),
        "date,keyword,count,status,day_growth_pct,week_growth_pct\n\
         2024-01-01,dress,100,ok,,\n\
         2024-01-02,dress,0,error: HTTP 503,,\n"
    );

    let loaded = history::load(&path).unwrap();
    assert!(matches!(loaded.layout, Layout::Current { .. }));
    assert_eq!(loaded.history.len(), 2);
    assert!(loaded.history.records().iter().all(|o| o.day_growth_pct.is_none()));
}

#[test]
fn migration_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");
    fs::write(&path, "date,keyword,count,status\n2024-01-01,bag,7,ok\n").unwrap();

    assert!(history::migrate(&path).unwrap().rewritten);
    let once = fs::read(&path).unwrap();

    let again = history::migrate(&path).unwrap();
    assert!(!again.rewritten);
    assert!(matches!(again.from, Layout::Current { .. }));
    assert_eq!(fs::read(&path).unwrap(), once);
}

#[test]
fn drifted_header_keeps_extras_after_known_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");
    fs::write(&path, "keyword,note,date,count,status\nshoe,hand edit,2024-02-01,12,ok\n").unwrap();

    let report = history::migrate(&path).unwrap();
    match &report.from {
        Layout::Drifted { missing, extras } => {
            assert_eq!(missing, &vec![Column::DayGrowthPct, Column::WeekGrowthPct]);
            assert_eq!(extras, &vec!["note".to_string()]);
        }
        other => panic!("unexpected layout {other:?}"),
    }
    assert_eq!(
        body(&path),
        "date,keyword,count,status,day_growth_pct,week_growth_pct,note\n\
         2024-02-01,shoe,12,ok,,,hand edit\n"
    );

    // extras survive a second pass untouched
    let again = history::migrate(&path).unwrap();
    assert_eq!(again.from, Layout::Current { extras: vec!["note".to_string()] });
    assert!(!again.rewritten);
}

#[test]
fn missing_and_empty_files_are_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");

    let report = history::migrate(&path).unwrap();
    assert_eq!(report.from, Layout::Missing);
    assert!(!path.exists());

    fs::write(&path, "").unwrap();
    let report = history::migrate(&path).unwrap();
    assert_eq!(report.from, Layout::Empty);
    assert!(!report.rewritten);
}

#[test]
fn overlong_rows_are_dropped_and_short_rows_padded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");
    fs::write(
        &path,
        "date,keyword,count,status\n2024-01-01,a,1,ok,surprise\n2024-01-01,b,2\n",
    )
    .unwrap();

    let report = history::migrate(&path).unwrap();
    assert_eq!(report.rows, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].reason, SkipReason::TooManyFields { expected: 4, found: 5 });

    assert_eq!(
        body(&path),
        "date,keyword,count,status,day_growth_pct,week_growth_pct\n2024-01-01,b,2,,,\n"
    );
}
