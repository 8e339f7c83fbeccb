// src/growth.rs
//
// Day-over-day and week-over-week growth against stored history.
//
// A growth figure exists only when the baseline row exists and its count is
// positive; otherwise it stays None. Day and week are looked up independently.

use time::{Date, Duration};

use crate::history::{BaselinePolicy, History};
use crate::model::Observation;

pub const DAY_LAG: i64 = 1;
pub const WEEK_LAG: i64 = 7;

/// `(current - base) / base * 100`, rounded to 2 decimals. None when base is 0.
pub fn pct_change(current: u64, base: u64) -> Option<f64> {
    if base == 0 {
        return None;
    }
    let raw = (current as f64 - base as f64) / base as f64 * 100.0;
    Some(round2(raw))
}

fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // Small declines round to -0.0
    if r == 0.0 { 0.0 } else { r }
}

fn lagged(date: Date, days: i64) -> Option<Date> {
    date.checked_sub(Duration::days(days))
}

/// Enrich each observation of `batch` with growth vs. `history`.
/// History is read-only context; the batch itself is never used as a baseline.
pub fn compute(batch: Vec<Observation>, history: &History, policy: BaselinePolicy) -> Vec<Observation> {
    let idx = history.index(policy);

    let growth_vs = |obs: &Observation, days: i64| -> Option<f64> {
        let base_date = lagged(obs.date, days)?;
        let base = idx.get(&(obs.keyword.as_str(), base_date))?;
        pct_change(obs.count, base.count)
    };

    batch.into_iter()
        .map(|mut obs| {
            obs.day_growth_pct = growth_vs(&obs, DAY_LAG);
            obs.week_growth_pct = growth_vs(&obs, WEEK_LAG);
            obs
        })
        .collect()
}
