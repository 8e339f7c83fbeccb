// tests/growth.rs
use kw_trends::growth::{compute, pct_change};
use kw_trends::history::{BaselinePolicy, History};
use kw_trends::model::fmt_pct;
use kw_trends::Observation;
use time::macros::date;

fn obs(d: time::Date, kw: &str, count: u64) -> Observation {
    Observation::new(d, kw, count, "ok")
}

#[test]
fn pct_change_rounds_to_two_decimals() {
    assert_eq!(pct_change(120, 100), Some(20.0));
    assert_eq!(pct_change(100, 300), Some(-66.67));
    assert_eq!(pct_change(1, 3), Some(-66.67));
    assert_eq!(pct_change(5, 0), None);
}

#[test]
fn tiny_declines_round_to_plain_zero() {
    let p = pct_change(199_999, 200_000).unwrap();
    assert_eq!(p, 0.0);
    assert!(p.is_sign_positive());
    assert_eq!(fmt_pct(Some(p)), "0.00");
    // stored "-0.00" cells read back as -0.0
    assert_eq!(fmt_pct(Some(-0.0)), "0.00");
    assert_eq!(fmt_pct(pct_change(99, 100)), "-1.00");
}

#[test]
fn day_growth_uses_previous_day_and_week_is_independent() {
    let history = History::new(vec![
        obs(date!(2024-01-01), "dress", 100),
        obs(date!(2024-01-08), "dress", 100),
    ]);
    let batch = vec![obs(date!(2024-01-09), "dress", 130)];

    let out = compute(batch, &history, BaselinePolicy::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].day_growth_pct, Some(30.0));
    // 2024-01-02 is not stored
    assert_eq!(out[0].week_growth_pct, None);
}

#[test]
fn week_growth_without_day_baseline() {
    let history = History::new(vec![obs(date!(2024-01-02), "bag", 200)]);
    let out = compute(vec![obs(date!(2024-01-09), "bag", 150)], &history, BaselinePolicy::default());
    assert_eq!(out[0].day_growth_pct, None);
    assert_eq!(out[0].week_growth_pct, Some(-25.0));
}

#[test]
fn zero_baseline_leaves_growth_absent() {
    let history = History::new(vec![
        Observation::new(date!(2024-03-07), "tent", 0, "error: timeout"),
        obs(date!(2024-03-01), "tent", 0),
    ]);
    let out = compute(vec![obs(date!(2024-03-08), "tent", 40)], &history, BaselinePolicy::default());
    assert_eq!(out[0].day_growth_pct, None);
    assert_eq!(out[0].week_growth_pct, None);
}

#[test]
fn baselines_are_matched_per_keyword() {
    let history = History::new(vec![
        obs(date!(2024-03-07), "a", 10),
        obs(date!(2024-03-07), "b", 50),
    ]);
    let batch = vec![obs(date!(2024-03-08), "b", 75), obs(date!(2024-03-08), "c", 75)];
    let out = compute(batch, &history, BaselinePolicy::default());
    assert_eq!(out[0].day_growth_pct, Some(50.0));
    assert_eq!(out[1].day_growth_pct, None);
}

#[test]
fn duplicate_baselines_follow_policy() {
    let history = History::new(vec![
        obs(date!(2024-03-07), "lamp", 100),
        obs(date!(2024-03-07), "lamp", 200),
    ]);
    let batch = || vec![obs(date!(2024-03-08), "lamp", 300)];

    let first = compute(batch(), &history, BaselinePolicy::FirstStored);
    assert_eq!(first[0].day_growth_pct, Some(200.0));

    let last = compute(batch(), &history, BaselinePolicy::LastStored);
    assert_eq!(last[0].day_growth_pct, Some(50.0));
}

#[test]
fn empty_history_enriches_nothing() {
    let out = compute(vec![obs(date!(2024-03-08), "x", 99)], &History::default(), BaselinePolicy::default());
    assert_eq!(out[0].count, 99);
    assert!(out[0].day_growth_pct.is_none() && out[0].week_growth_pct.is_none());
}

#[test]
fn baseline_policy_parses_names() {
    assert_eq!(BaselinePolicy::parse("first"), Some(BaselinePolicy::FirstStored));
    assert_eq!(BaselinePolicy::parse(" LAST "), Some(BaselinePolicy::LastStored));
    assert_eq!(BaselinePolicy::parse("latest"), Some(BaselinePolicy::LastStored));
    assert_eq!(BaselinePolicy::parse("middle"), None);
}
