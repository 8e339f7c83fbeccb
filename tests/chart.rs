// tests/chart.rs
use kw_trends::gui::chart::{bounds, series};
use kw_trends::history::{BaselinePolicy, History};
use kw_trends::Observation;
use time::macros::date;

#[test]
fn series_are_per_keyword_sorted_and_skip_failures() {
    let history = History::new(vec![
        Observation::new(date!(2024-06-03), "tent", 30, "ok"),
        Observation::new(date!(2024-06-01), "tent", 10, "ok"),
        Observation::new(date!(2024-06-02), "tent", 0, "error: HTTP 503"),
        Observation::new(date!(2024-06-01), "lamp", 5, "ok"),
        Observation::new(date!(2024-06-01), "tent", 99, "ok"),
    ]);
    let selected = vec!["tent".to_string(), "ghost".to_string()];

    let s = series(&history, &selected, BaselinePolicy::FirstStored);
    assert_eq!(s.len(), 1);
    assert_eq!(s[0].keyword, "tent");
    assert_eq!(s[0].points, vec![(date!(2024-06-01), 10), (date!(2024-06-03), 30)]);

    let last = series(&history, &selected, BaselinePolicy::LastStored);
    assert_eq!(last[0].points[0], (date!(2024-06-01), 99));
}

#[test]
fn bounds_cover_all_series() {
    let history = History::new(vec![
        Observation::new(date!(2024-06-02), "a", 7, "ok"),
        Observation::new(date!(2024-06-05), "b", 70, "ok"),
    ]);
    let s = series(&history, &["a".to_string(), "b".to_string()], BaselinePolicy::default());
    assert_eq!(bounds(&s), Some((date!(2024-06-02), date!(2024-06-05), 70)));
    assert_eq!(bounds(&[]), None);
}
