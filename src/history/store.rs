// src/history/store.rs
//
// Tolerant reader and appender for the history file.
//
// Reading never fails on content: rows that cannot be coerced are dropped and
// returned as SkippedRow so callers can see what was lost. Only I/O errors
// other than "file not found" surface as Err.

use std::collections::HashMap;
use std::path::Path;

use time::Date;

use super::schema::{detect, Layout, SkipReason, SkippedRow};
use crate::csv::{parse_records, split_header, Record, SEP};
use crate::error::Result;
use crate::file;
use crate::model::{
    header_names, parse_date, Column, Observation, RecordV1, StoredRecord, CURRENT_COLUMNS,
};

/// Which stored row wins when history holds the same (keyword, date) twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BaselinePolicy {
    /// First matching row in stored (append) order.
    #[default]
    FirstStored,
    /// Most recently appended matching row.
    LastStored,
}

impl BaselinePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_stored" => Some(BaselinePolicy::FirstStored),
            "last" | "last_stored" | "latest" => Some(BaselinePolicy::LastStored),
            _ => None,
        }
    }
}

/// All past observations, in stored order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    records: Vec<Observation>,
}

impl History {
    pub fn new(records: Vec<Observation>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Observation] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Distinct keywords in first-seen order.
    pub fn keywords(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records.iter()
            .filter(|r| seen.insert(r.keyword.as_str()))
            .map(|r| r.keyword.clone())
            .collect()
    }

    /// Rows for one logical date, in stored order.
    pub fn on_date(&self, date: Date) -> impl Iterator<Item = &Observation> + '_ {
        self.records.iter().filter(move |r| r.date == date)
    }

    /// Lookup table (keyword, date) → row, resolving duplicates per `policy`.
    pub fn index(&self, policy: BaselinePolicy) -> HashMap<(&str, Date), &Observation> {
        let mut idx: HashMap<(&str, Date), &Observation> = HashMap::with_capacity(self.records.len());
        for r in &self.records {
            let key = (r.keyword.as_str(), r.date);
            match policy {
                BaselinePolicy::FirstStored => { idx.entry(key).or_insert(r); }
                BaselinePolicy::LastStored => { idx.insert(key, r); }
            }
        }
        idx
    }
}

/// Result of a tolerant load.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLoad {
    pub history: History,
    pub layout: Layout,
    /// Header as found on disk; None when the file is missing or empty.
    pub header: Option<Vec<String>>,
    pub skipped: Vec<SkippedRow>,
}

/// Where each recognized column sits in the file, if present at all.
struct ColumnIndex {
    pos: HashMap<Column, usize>,
    width: usize,
}

impl ColumnIndex {
    fn new(header: &[String]) -> Self {
        let mut pos = HashMap::new();
        for (i, h) in header.iter().enumerate() {
            if let Some(c) = Column::from_name(h) {
                pos.entry(c).or_insert(i);
            }
        }
        Self { pos, width: header.len() }
    }

    /// Cell text for `col`; absent column or short row → "".
    fn get<'a>(&self, rec: &'a Record, col: Column) -> &'a str {
        self.pos.get(&col)
            .and_then(|&i| rec.fields.get(i))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

fn parse_count(raw: &str) -> Option<u64> {
    let t = raw.trim();
    if let Ok(n) = t.parse::<u64>() {
        return Some(n);
    }
    // Tools that round-trip through floats write "120.0"
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
        _ => None,
    }
}

fn parse_pct(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_record(idx: &ColumnIndex, layout: &Layout, rec: &Record) -> std::result::Result<StoredRecord, SkipReason> {
    if rec.fields.len() > idx.width {
        return Err(SkipReason::TooManyFields { expected: idx.width, found: rec.fields.len() });
    }

    let raw_date = idx.get(rec, Column::Date);
    let date = parse_date(raw_date).ok_or_else(|| SkipReason::BadDate(s!(raw_date)))?;

    let keyword = idx.get(rec, Column::Keyword);
    if keyword.trim().is_empty() {
        return Err(SkipReason::EmptyKeyword);
    }

    let raw_count = idx.get(rec, Column::Count);
    let count = parse_count(raw_count).ok_or_else(|| SkipReason::BadCount(s!(raw_count)))?;

    let status = s!(idx.get(rec, Column::Status));

    let base = RecordV1 { date, keyword: s!(keyword), count, status };
    Ok(match layout {
        Layout::V1 => StoredRecord::V1(base),
        _ => {
            let mut obs = base.upgrade();
            obs.day_growth_pct = parse_pct(idx.get(rec, Column::DayGrowthPct));
            obs.week_growth_pct = parse_pct(idx.get(rec, Column::WeekGrowthPct));
            StoredRecord::V2(obs)
        }
    })
}

/// Parse history text (any known or drifted layout).
pub fn parse(text: &str) -> HistoryLoad {
    let (header, records) = split_header(parse_records(text, SEP));
    let Some(header) = header else {
        return HistoryLoad { history: History::default(), layout: Layout::Empty, header: None, skipped: Vec::new() };
    };

    let layout = detect(&header);
    if layout == Layout::Empty {
        // Blank or whitespace-only file: nothing to keep, restart it on append.
        return HistoryLoad { history: History::default(), layout, header: None, skipped: Vec::new() };
    }
    let idx = ColumnIndex::new(&header);

    let mut out = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for rec in &records {
        match parse_record(&idx, &layout, rec) {
            Ok(r) => out.push(r.into_current()),
            Err(reason) => skipped.push(SkippedRow { line: rec.line, reason }),
        }
    }

    HistoryLoad { history: History::new(out), layout, header: Some(header), skipped }
}

/// Load the history file. Missing or empty file → empty history.
pub fn load(path: &Path) -> Result<HistoryLoad> {
    let Some(text) = file::read_text(path)? else {
        return Ok(HistoryLoad { history: History::default(), layout: Layout::Missing, header: None, skipped: Vec::new() });
    };
    let loaded = parse(&text);
    for s in &loaded.skipped {
        logw!("History: skipped line {} ({})", s.line, s.reason);
    }
    logd!(
        "History: loaded {} rows from {} ({:?})",
        loaded.history.len(), path.display(), loaded.layout
    );
    Ok(loaded)
}

/// Append observations under the on-disk header. Unknown columns get blanks.
/// With no usable header the file is (re)started in the current layout.
pub fn append(path: &Path, header: Option<&[String]>, batch: &[Observation]) -> Result<()> {
    match header.filter(|h| h.iter().any(|n| Column::from_name(n).is_some())) {
        Some(h) => {
            let cols: Vec<Option<Column>> = h.iter().map(|n| Column::from_name(n)).collect();
            let rows: Vec<Vec<String>> = batch.iter()
                .map(|o| cols.iter().map(|c| c.map(|c| o.cell(c)).unwrap_or_default()).collect())
                .collect();
            file::append_rows(path, h, &rows)
        }
        None => {
            let rows: Vec<Vec<String>> = batch.iter().map(|o| o.to_row(&CURRENT_COLUMNS)).collect();
            file::write_table(path, &header_names(&CURRENT_COLUMNS), &rows)
        }
    }
}
