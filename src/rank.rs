// src/rank.rs
//
// Top-risers selection with tiered fallback. The first non-empty tier wins:
//   1. week growth present, count >= min_count, by week growth desc
//   2. day growth present,  count >= min_count, by day growth desc
//   3. everything, by raw count desc
// Sorts are stable, so ties keep batch order.

use std::cmp::Ordering;

use crate::model::Observation;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_MIN_COUNT: u64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    WeekGrowth,
    DayGrowth,
    RawCount,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::WeekGrowth => "week growth",
            Tier::DayGrowth => "day growth",
            Tier::RawCount => "raw count",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ranking {
    pub tier: Tier,
    pub rows: Vec<Observation>,
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

fn growth_tier(
    batch: &[Observation],
    min_count: u64,
    pick: impl Fn(&Observation) -> Option<f64>,
) -> Vec<Observation> {
    let mut hits: Vec<(f64, &Observation)> = batch.iter()
        .filter(|o| o.count >= min_count)
        .filter_map(|o| pick(o).map(|g| (g, o)))
        .collect();
    hits.sort_by(|a, b| desc(a.0, b.0));
    hits.into_iter().map(|(_, o)| o.clone()).collect()
}

pub fn rank(batch: &[Observation], top_n: usize, min_count: u64) -> Ranking {
    let (tier, mut rows) = {
        let week = growth_tier(batch, min_count, |o| o.week_growth_pct);
        if !week.is_empty() {
            (Tier::WeekGrowth, week)
        } else {
            let day = growth_tier(batch, min_count, |o| o.day_growth_pct);
            if !day.is_empty() {
                (Tier::DayGrowth, day)
            } else {
                let mut all = batch.to_vec();
                all.sort_by(|a, b| b.count.cmp(&a.count));
                (Tier::RawCount, all)
            }
        }
    };
    rows.truncate(top_n);
    Ranking { tier, rows }
}
