// src/runlog.rs
//
// Run log sink for the `log` facade. Each record becomes one line
//   [YYYY-MM-DD HH:MM:SS] message
// appended to the per-day log file and echoed to stderr. Timestamps use the
// configured UTC offset. Logging is best effort: write failures are dropped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};
use time::{macros::format_description, OffsetDateTime, UtcOffset};

/// Where the installed logger currently writes. Swappable so a long-lived GUI
/// session follows the date of each run. Lines logged before any file is set
/// wait in `pending` and land in the first file.
struct Sink {
    path: Option<PathBuf>,
    offset: UtcOffset,
    pending: Vec<String>,
}

const MAX_PENDING: usize = 256;

static SINK: Mutex<Sink> = Mutex::new(Sink { path: None, offset: UtcOffset::UTC, pending: Vec::new() });
static INSTALLED: OnceLock<()> = OnceLock::new();

pub struct RunLog {
    echo: bool,
}

fn timestamp(offset: UtcOffset) -> String {
    OffsetDateTime::now_utc()
        .to_offset(offset)
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_default()
}

pub fn format_line(ts: &str, level: Level, msg: &str) -> String {
    match level {
        Level::Error | Level::Warn => format!("[{ts}] {level}: {msg}\n"),
        _ => format!("[{ts}] {msg}\n"),
    }
}

fn append_to(path: &Path, text: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(text.as_bytes());
    }
}

impl Log for RunLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut sink) = SINK.lock() else { return };
        let line = format_line(&timestamp(sink.offset), record.level(), &record.args().to_string());

        if self.echo {
            eprint!("{line}");
        }

        match sink.path.as_ref() {
            Some(path) => append_to(path, &line),
            None if sink.pending.len() < MAX_PENDING => sink.pending.push(line),
            None => {}
        }
    }

    fn flush(&self) {}
}

/// Install the run logger once per process, before any file is known.
/// Later calls only update the offset and level.
pub fn install(offset: UtcOffset, verbose: bool) {
    if let Ok(mut sink) = SINK.lock() {
        sink.offset = offset;
    }
    INSTALLED.get_or_init(|| {
        let _ = log::set_boxed_logger(Box::new(RunLog { echo: true }));
    });
    log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
}

/// Install (if needed) and point the logger at `path`.
pub fn init(path: &Path, offset: UtcOffset, verbose: bool) {
    install(offset, verbose);
    set_file(path);
}

/// Redirect the log to `path`, creating its directory. Lines buffered
/// before the first file was set are written there first.
pub fn set_file(path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    if let Ok(mut sink) = SINK.lock() {
        let pending = std::mem::take(&mut sink.pending);
        if !pending.is_empty() {
            append_to(path, &pending.concat());
        }
        sink.path = Some(path.to_path_buf());
    }
}
