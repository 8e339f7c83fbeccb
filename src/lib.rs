// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod csv;
pub mod error;
pub mod file;
pub mod growth;
pub mod gui;
pub mod history;
pub mod keywords;
pub mod model;
pub mod net;
pub mod progress;
pub mod rank;
pub mod runlog;
pub mod runner;
pub mod source;

pub use error::{Result, TrendError};
pub use model::Observation;
pub use runner::{Pipeline, RunSummary, Stage};
