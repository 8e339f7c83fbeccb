// src/config/file.rs
//
// Optional `key = value` config file layered over RunConfig defaults.
// Lines starting with '#' and blank lines are ignored. Unknown keys are
// logged and skipped; malformed values are a configuration error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::options::{offset_hours, RunConfig};
use crate::error::{Result, TrendError};
use crate::file;
use crate::history::BaselinePolicy;

fn bad(key: &str, val: &str) -> TrendError {
    TrendError::Config(format!("invalid value for {key}: {val:?}"))
}

fn num<T: std::str::FromStr>(key: &str, val: &str) -> Result<T> {
    val.parse::<T>().map_err(|_| bad(key, val))
}

/// Apply one `key = value` setting.
pub fn apply_setting(cfg: &mut RunConfig, key: &str, val: &str) -> Result<bool> {
    match key {
        "out_dir" => cfg.out_dir = PathBuf::from(val),
        "keywords" => cfg.keywords_path = PathBuf::from(val),
        "top_n" => cfg.top_n = num(key, val)?,
        "min_count" => cfg.min_count = num(key, val)?,
        "pause_ms" => cfg.pause = Duration::from_millis(num(key, val)?),
        "utc_offset_hours" => cfg.utc_offset = offset_hours(num(key, val)?)?,
        "baseline" => cfg.baseline = BaselinePolicy::parse(val).ok_or_else(|| bad(key, val))?,
        "retries" => cfg.source.retries = num(key, val)?,
        "timeout_secs" => cfg.source.timeout = Duration::from_secs(num(key, val)?),
        "url" => cfg.source.url = s!(val),
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parse config text into `cfg`.
pub fn apply_text(cfg: &mut RunConfig, text: &str) -> Result<()> {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else {
            logw!("Config: ignoring line without '=': {line}");
            continue;
        };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();
        if !apply_setting(cfg, key, val)? {
            logw!("Config: unknown key {key:?}");
        }
    }
    Ok(())
}

/// Layer a config file over `cfg`. Returns false when the file does not exist.
pub fn apply_file(cfg: &mut RunConfig, path: &Path) -> Result<bool> {
    match file::read_text(path)? {
        Some(text) => {
            apply_text(cfg, &text)?;
            logd!("Config: applied {}", path.display());
            Ok(true)
        }
        None => Ok(false),
    }
}
