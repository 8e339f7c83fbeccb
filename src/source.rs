// src/source.rs
//
// Metric source: result count per keyword. A failed keyword is reported in
// the status string with count 0; it never aborts the batch.

use serde_json::Value;
use time::Date;

use crate::config::SourceOptions;
use crate::error::{Result, TrendError};
use crate::model::STATUS_OK;
use crate::net::HttpClient;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fetched {
    pub count: u64,
    pub status: String,
}

impl Fetched {
    pub fn ok(count: u64) -> Self {
        Self { count, status: s!(STATUS_OK) }
    }

    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self { count: 0, status: format!("error: {detail}") }
    }
}

pub trait MetricSource {
    /// Count for `keyword` on logical day `date`. Must not panic on failure.
    fn fetch(&mut self, keyword: &str, date: Date) -> Fetched;
}

/// `totalRows` of a search response; number or numeric string, absent → 0.
pub fn total_rows(body: &Value) -> Result<u64> {
    let bad = |v: &Value| TrendError::Decode(format!("totalRows = {v}"));
    match body.get("totalRows") {
        None | Some(Value::Null) => Ok(0),
        Some(v @ Value::Number(n)) => n.as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| bad(v)),
        Some(v @ Value::String(s)) => s.trim().parse::<u64>().map_err(|_| bad(v)),
        Some(v) => Err(bad(v)),
    }
}

/// PChome product search (`totalRows` of page 1).
pub struct PchomeSource {
    client: HttpClient,
    url: String,
}

impl PchomeSource {
    pub fn new(opts: &SourceOptions) -> Self {
        Self { client: HttpClient::new(opts), url: opts.url.clone() }
    }
}

impl MetricSource for PchomeSource {
    fn fetch(&mut self, keyword: &str, _date: Date) -> Fetched {
        // The search endpoint only knows "now"; the date is the batch label.
        match self.client.get_json(&self.url, &[("q", keyword), ("page", "1")])
            .and_then(|body| total_rows(&body))
        {
            Ok(n) => Fetched::ok(n),
            Err(e) => Fetched::error(e),
        }
    }
}
