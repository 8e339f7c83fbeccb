// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use time::{Date, OffsetDateTime, UtcOffset};

use super::consts::*;
use crate::error::{Result, TrendError};
use crate::history::BaselinePolicy;
use crate::model::fmt_date;
use crate::rank::{DEFAULT_MIN_COUNT, DEFAULT_TOP_N};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub url: String,
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub retries: u32,
    /// Backoff base; attempt n waits `backoff * 2^(n-1)`.
    pub backoff: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            url: s!(SEARCH_URL),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            retries: RETRIES,
            backoff: Duration::from_millis(BACKOFF_MS),
        }
    }
}

/// Everything one batch run needs. Built once, passed into the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub out_dir: PathBuf,
    /// Logical day of the batch.
    pub date: Date,
    pub keywords_path: PathBuf,
    pub top_n: usize,
    pub min_count: u64,
    /// Pause between keyword fetches.
    pub pause: Duration,
    pub utc_offset: UtcOffset,
    pub baseline: BaselinePolicy,
    pub source: SourceOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        let utc_offset = offset_hours(UTC_OFFSET_HOURS).unwrap_or(UtcOffset::UTC);
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            date: today_at(utc_offset),
            keywords_path: PathBuf::from(KEYWORDS_FILE),
            top_n: DEFAULT_TOP_N,
            min_count: DEFAULT_MIN_COUNT,
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            utc_offset,
            baseline: BaselinePolicy::default(),
            source: SourceOptions::default(),
        }
    }
}

impl RunConfig {
    pub fn for_date(out_dir: impl Into<PathBuf>, date: Date) -> Self {
        Self { out_dir: out_dir.into(), date, ..Self::default() }
    }

    pub fn history_path(&self) -> PathBuf {
        self.out_dir.join(HISTORY_FILE)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dated_path(SNAPSHOT_PREFIX, "csv")
    }

    pub fn report_path(&self) -> PathBuf {
        self.dated_path(REPORT_PREFIX, "csv")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dated_path(LOG_PREFIX, "txt")
    }

    fn dated_path(&self, prefix: &str, ext: &str) -> PathBuf {
        self.out_dir.join(join!(prefix, "_", &fmt_date(self.date), ".", ext))
    }
}

pub fn offset_hours(hours: i8) -> Result<UtcOffset> {
    UtcOffset::from_hms(hours, 0, 0)
        .map_err(|e| TrendError::Config(format!("utc offset {hours}: {e}")))
}

/// Calendar date right now at `offset`.
pub fn today_at(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}
