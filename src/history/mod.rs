// src/history/mod.rs
//
// The persisted time series: layout migration (schema) and tolerant
// load/append (store). Growth and ranking only ever see `History`.

pub mod schema;
pub mod store;

pub use schema::{migrate, Layout, MigrationReport, SkipReason, SkippedRow};
pub use store::{append, load, parse, BaselinePolicy, History, HistoryLoad};
