// src/history/schema.rs
//
// Layout detection and in-place widening of the history file.
//
// The header row is the only schema marker. Two shapes are known:
//   V1      = date, keyword, count, status
//   current = V1 + day_growth_pct, week_growth_pct
// Anything else is "drifted": missing recognized columns are added (blank),
// unknown columns are kept after the recognized ones, and the file is rewritten.
// A header that already starts with the current columns is left alone, which
// makes the pass idempotent.

use std::fmt;
use std::path::Path;

use crate::csv::{parse_records, split_header, Record, SEP};
use crate::error::Result;
use crate::file;
use crate::model::{header_names, Column, CURRENT_COLUMNS, V1_COLUMNS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// No history file yet.
    Missing,
    /// File exists but has no header.
    Empty,
    V1,
    Current { extras: Vec<String> },
    Drifted { missing: Vec<Column>, extras: Vec<String> },
}

impl Layout {
    pub fn needs_rewrite(&self) -> bool {
        matches!(self, Layout::V1 | Layout::Drifted { .. })
    }
}

pub fn detect(header: &[String]) -> Layout {
    let names: Vec<&str> = header.iter().map(|h| h.trim()).collect();
    if names.is_empty() || (names.len() == 1 && names[0].is_empty()) {
        return Layout::Empty;
    }

    let v1: Vec<&str> = V1_COLUMNS.iter().map(|c| c.name()).collect();
    if names == v1 {
        return Layout::V1;
    }

    let extras: Vec<String> = names.iter()
        .filter(|n| Column::from_name(n).is_none())
        .map(|n| s!(*n))
        .collect();

    let current: Vec<&str> = CURRENT_COLUMNS.iter().map(|c| c.name()).collect();
    if names.len() >= current.len() && names[..current.len()] == current[..] {
        return Layout::Current { extras };
    }

    let missing = CURRENT_COLUMNS.iter()
        .copied()
        .filter(|c| !names.contains(&c.name()))
        .collect();
    Layout::Drifted { missing, extras }
}

/* ---------------- Skipped rows ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    TooManyFields { expected: usize, found: usize },
    BadDate(String),
    EmptyKeyword,
    BadCount(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooManyFields { expected, found } =>
                write!(f, "expected at most {expected} fields, found {found}"),
            SkipReason::BadDate(v) => write!(f, "unparseable date {v:?}"),
            SkipReason::EmptyKeyword => write!(f, "empty keyword"),
            SkipReason::BadCount(v) => write!(f, "unparseable count {v:?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/* ---------------- Migration ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct MigrationReport {
    pub from: Layout,
    pub rewritten: bool,
    /// Data rows carried into the rewritten file (0 when nothing was rewritten).
    pub rows: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Target header for a given source header: current columns, then unknown extras.
pub fn target_header(source: &[String]) -> Vec<String> {
    let mut out = header_names(&CURRENT_COLUMNS);
    for h in source {
        let h = h.trim();
        if Column::from_name(h).is_none() {
            out.push(s!(h));
        }
    }
    out
}

/// Re-shape data rows from `source` header to `target_header(source)`.
/// Rows with more fields than the source header cannot be attributed and are
/// skipped; short rows are padded with blanks.
pub fn widen_rows(source: &[String], records: Vec<Record>) -> (Vec<String>, Vec<Vec<String>>, Vec<SkippedRow>) {
    let target = target_header(source);
    let src_pos: Vec<Option<usize>> = target.iter()
        .map(|t| source.iter().position(|h| h.trim() == t))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for rec in records {
        if rec.fields.len() > source.len() {
            skipped.push(SkippedRow {
                line: rec.line,
                reason: SkipReason::TooManyFields { expected: source.len(), found: rec.fields.len() },
            });
            continue;
        }
        let row = src_pos.iter()
            .map(|pos| pos.and_then(|i| rec.fields.get(i)).cloned().unwrap_or_default())
            .collect();
        rows.push(row);
    }

    (target, rows, skipped)
}

/// Inspect the history file and upgrade it to the current layout if needed.
/// Safe to call on every start: a missing, empty or current file is untouched.
pub fn migrate(path: &Path) -> Result<MigrationReport> {
    let Some(text) = file::read_text(path)? else {
        logd!("History: {} not found, nothing to migrate", path.display());
        return Ok(MigrationReport { from: Layout::Missing, rewritten: false, rows: 0, skipped: Vec::new() });
    };

    let (header, records) = split_header(parse_records(&text, SEP));
    let header = header.unwrap_or_default();
    let layout = detect(&header);

    if !layout.needs_rewrite() {
        return Ok(MigrationReport { from: layout, rewritten: false, rows: 0, skipped: Vec::new() });
    }

    let (target, rows, skipped) = widen_rows(&header, records);
    for s in &skipped {
        logw!("History: skipped line {} during migration ({})", s.line, s.reason);
    }

    file::write_table(path, &target, &rows)?;

    match &layout {
        Layout::V1 => logf!(
            "History: upgraded {} from 4-column layout ({} rows, {} skipped)",
            path.display(), rows.len(), skipped.len()
        ),
        Layout::Drifted { missing, extras } => logf!(
            "History: normalized {} (added {:?}, kept extra {:?}; {} rows, {} skipped)",
            path.display(),
            missing.iter().map(|c| c.name()).collect::<Vec<_>>(),
            extras,
            rows.len(),
            skipped.len()
        ),
        _ => {}
    }

    Ok(MigrationReport { from: layout, rewritten: true, rows: rows.len(), skipped })
}
