// src/keywords.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::consts::DEFAULT_KEYWORDS;
use crate::file;

pub trait KeywordProvider {
    /// Ordered, de-duplicated keywords. Never empty.
    fn keywords(&self) -> Vec<String>;
}

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| s!(*k)).collect()
}

/// One keyword per line; lines trimmed, blanks ignored, first occurrence wins.
pub fn parse_list(text: &str) -> Vec<String> {
    let text = text.strip_prefix(crate::csv::BOM).unwrap_or(text);
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|l| seen.insert(*l))
        .map(|l| s!(l))
        .collect()
}

/// Keyword list file with the built-in default as fallback.
pub struct FileKeywords {
    path: PathBuf,
}

impl FileKeywords {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl KeywordProvider for FileKeywords {
    fn keywords(&self) -> Vec<String> {
        match file::read_text(&self.path) {
            Ok(Some(text)) => {
                let list = parse_list(&text);
                if list.is_empty() {
                    logf!("Keywords: {} is empty, using default list", self.path.display());
                    default_keywords()
                } else {
                    list
                }
            }
            Ok(None) => {
                logf!(
                    "Keywords: {} not found, using default list: {:?}",
                    self.path.display(), DEFAULT_KEYWORDS
                );
                default_keywords()
            }
            Err(e) => {
                logw!("Keywords: {e}; using default list");
                default_keywords()
            }
        }
    }
}

/// Fixed in-memory list (GUI overrides, tests).
pub struct StaticKeywords(pub Vec<String>);

impl KeywordProvider for StaticKeywords {
    fn keywords(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let list: Vec<String> = self.0.iter()
            .filter(|k| !k.trim().is_empty() && seen.insert(k.as_str()))
            .cloned()
            .collect();
        if list.is_empty() { default_keywords() } else { list }
    }
}
