// tests/history_load.rs
use std::fs;

use kw_trends::history::{self, Layout, SkipReason};
use kw_trends::model::parse_date;
use kw_trends::Observation;
use time::macros::date;

#[test]
fn malformed_rows_are_skipped_with_reasons() {
    let text = "\u{feff}date,keyword,count,status,day_growth_pct,week_growth_pct\r\n\
                2024-04-01,ok row,120,ok,5.5,\r\n\
                yesterday,bad date,1,ok,,\r\n\
                2024-04-01,,3,ok,,\r\n\
                2024-04-01,neg,-4,ok,,\r\n\
                2024-04-01,float,120.0,ok,,nan?\r\n";
    let loaded = history::parse(text);

    assert!(matches!(loaded.layout, Layout::Current { .. }));
    let reasons: Vec<(usize, SkipReason)> =
        loaded.skipped.iter().map(|s| (s.line, s.reason.clone())).collect();
    assert_eq!(
        reasons,
        vec![
            (3, SkipReason::BadDate("yesterday".into())),
            (4, SkipReason::EmptyKeyword),
            (5, SkipReason::BadCount("-4".into())),
        ]
    );

    let recs = loaded.history.records();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].keyword, "ok row");
    assert_eq!(recs[0].day_growth_pct, Some(5.5));
    assert_eq!(recs[1].count, 120);
    assert_eq!(recs[1].week_growth_pct, None);
}

#[test]
fn v1_text_loads_without_growth() {
    let loaded = history::parse("date,keyword,count,status\n2024-01-01,dress,100,ok\n");
    assert_eq!(loaded.layout, Layout::V1);
    let r = &loaded.history.records()[0];
    assert_eq!(r.date, date!(2024-01-01));
    assert_eq!(r.count, 100);
    assert!(r.day_growth_pct.is_none());
}

#[test]
fn missing_file_is_an_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = history::load(&dir.path().join("nope.csv")).unwrap();
    assert_eq!(loaded.layout, Layout::Missing);
    assert!(loaded.history.is_empty());
    assert!(loaded.header.is_none());
}

#[test]
fn append_then_load_returns_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");

    let mut a = Observation::new(date!(2024-04-02), "lamp, desk", 10, "ok");
    a.day_growth_pct = Some(-12.5);
    let b = Observation::new(date!(2024-04-02), "床墊", 0, "error: HTTP 503");

    history::append(&path, None, &[a.clone(), b.clone()]).unwrap();
    let first = history::load(&path).unwrap();
    assert_eq!(first.history.records(), &[a.clone(), b.clone()]);

    // second append goes under the existing header
    let c = Observation::new(date!(2024-04-03), "lamp, desk", 11, "ok");
    history::append(&path, first.header.as_deref(), std::slice::from_ref(&c)).unwrap();
    let second = history::load(&path).unwrap();
    assert_eq!(second.history.records(), &[a, b, c]);
    assert!(second.skipped.is_empty());
}

#[test]
fn append_fills_unknown_columns_blank_and_fixes_missing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.csv");
    fs::write(
        &path,
        "date,keyword,count,status,day_growth_pct,week_growth_pct,note\n2024-04-01,x,1,ok,,,kept",
    )
    .unwrap();

    let loaded = history::load(&path).unwrap();
    let batch = [Observation::new(date!(2024-04-02), "x", 2, "ok")];
    history::append(&path, loaded.header.as_deref(), &batch).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("2024-04-01,x,1,ok,,,kept\n2024-04-02,x,2,ok,,,\n"));
    assert_eq!(history::load(&path).unwrap().history.len(), 2);
}

#[test]
fn history_helpers() {
    let d = parse_date("2024-04-02").unwrap();
    let h = history::History::new(vec![
        Observation::new(d, "b", 1, "ok"),
        Observation::new(d, "a", 2, "ok"),
        Observation::new(date!(2024-04-01), "b", 3, "ok"),
    ]);
    assert_eq!(h.keywords(), ["b", "a"]);
    assert_eq!(h.on_date(d).count(), 2);
    assert_eq!(parse_date("not a date"), None);
}
