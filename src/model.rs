// src/model.rs
//
// Row types for the keyword time series.
//
// - Observation: one (date, keyword) measurement plus its derived growth.
// - Column: the recognized column set, in canonical on-disk order.
// - RecordV1 / StoredRecord: the two stored shapes, with the V1 → V2 upgrade.

use time::{Date, macros::format_description};

pub const STATUS_OK: &str = "ok";

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn fmt_date(d: Date) -> String {
    d.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| d.to_string())
}

/// Growth cells render with two decimals; absence renders blank.
pub fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(p) if p == 0.0 => s!("0.00"),
        Some(p) => format!("{p:.2}"),
        None => s!(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub date: Date,
    pub keyword: String,
    pub count: u64,
    pub status: String,
    pub day_growth_pct: Option<f64>,
    pub week_growth_pct: Option<f64>,
}

impl Observation {
    /// Fresh, not yet enriched observation.
    pub fn new(date: Date, keyword: impl Into<String>, count: u64, status: impl Into<String>) -> Self {
        Self {
            date,
            keyword: keyword.into(),
            count,
            status: status.into(),
            day_growth_pct: None,
            week_growth_pct: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Cell text for one recognized column.
    pub fn cell(&self, col: Column) -> String {
        match col {
            Column::Date => fmt_date(self.date),
            Column::Keyword => self.keyword.clone(),
            Column::Count => self.count.to_string(),
            Column::Status => self.status.clone(),
            Column::DayGrowthPct => fmt_pct(self.day_growth_pct),
            Column::WeekGrowthPct => fmt_pct(self.week_growth_pct),
        }
    }

    pub fn to_row(&self, cols: &[Column]) -> Vec<String> {
        cols.iter().map(|c| self.cell(*c)).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Keyword,
    Count,
    Status,
    DayGrowthPct,
    WeekGrowthPct,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Keyword => "keyword",
            Column::Count => "count",
            Column::Status => "status",
            Column::DayGrowthPct => "day_growth_pct",
            Column::WeekGrowthPct => "week_growth_pct",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        CURRENT_COLUMNS.iter().copied().find(|c| c.name() == name.trim())
    }
}

/// Oldest stored layout.
pub const V1_COLUMNS: [Column; 4] = [Column::Date, Column::Keyword, Column::Count, Column::Status];

/// Current stored layout: V1 plus the growth columns.
pub const CURRENT_COLUMNS: [Column; 6] = [
    Column::Date,
    Column::Keyword,
    Column::Count,
    Column::Status,
    Column::DayGrowthPct,
    Column::WeekGrowthPct,
];

/// Top-risers report column order.
pub const REPORT_COLUMNS: [Column; 6] = [
    Column::Date,
    Column::Keyword,
    Column::Count,
    Column::DayGrowthPct,
    Column::WeekGrowthPct,
    Column::Status,
];

pub fn header_names(cols: &[Column]) -> Vec<String> {
    cols.iter().map(|c| s!(c.name())).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordV1 {
    pub date: Date,
    pub keyword: String,
    pub count: u64,
    pub status: String,
}

impl RecordV1 {
    /// Widen to the current shape; growth is unknown for old rows.
    pub fn upgrade(self) -> Observation {
        Observation::new(self.date, self.keyword, self.count, self.status)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoredRecord {
    V1(RecordV1),
    V2(Observation),
}

impl StoredRecord {
    pub fn into_current(self) -> Observation {
        match self {
            StoredRecord::V1(r) => r.upgrade(),
            StoredRecord::V2(o) => o,
        }
    }
}
