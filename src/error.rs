// src/error.rs
use std::{io, path::PathBuf};

use crate::runner::Stage;

#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("cannot read {}: {source}", .path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("http: {0}")]
    Http(String),

    #[error("bad response body: {0}")]
    Decode(String),

    #[error("configuration: {0}")]
    Config(String),

    /// Unrecoverable failure outside the per-keyword loop.
    #[error("run aborted during {stage:?}: {source}")]
    Fatal {
        stage: Stage,
        #[source]
        source: Box<TrendError>,
    },
}

impl TrendError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StoreRead { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StoreWrite { path: path.into(), source }
    }

    pub fn at(self, stage: Stage) -> Self {
        match self {
            fatal @ Self::Fatal { .. } => fatal,
            other => Self::Fatal { stage, source: Box::new(other) },
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;
