// src/file.rs
//
// Thin filesystem layer: create dirs, overwrite whole tables, append rows.
// Every failure here is a store failure and is reported with its path.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::csv::{write_row, BOM, SEP};
use crate::error::{Result, TrendError};

/// Read a whole file. A missing file is `Ok(None)`, not an error.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TrendError::read(path, e)),
    }
}

/// Create/truncate `path` and write BOM, header and rows.
pub fn write_table(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    ensure_parent(path)?;
    let io_res = (|| -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(BOM.as_bytes())?;
        write_row(&mut out, header, SEP)?;
        for row in rows {
            write_row(&mut out, row, SEP)?;
        }
        out.flush()
    })();
    io_res.map_err(|e| TrendError::write(path, e))
}

/// Append rows to an existing table. A missing or zero-length file is
/// started with `header_if_new`.
pub fn append_rows(path: &Path, header_if_new: &[String], rows: &[Vec<String>]) -> Result<()> {
    let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    if is_new {
        return write_table(path, header_if_new, rows);
    }
    let io_res = (|| -> io::Result<()> {
        let file = OpenOptions::new().append(true).open(path)?;
        let mut out = BufWriter::new(file);
        if !ends_with_newline(path)? {
            writeln!(out)?;
        }
        for row in rows {
            write_row(&mut out, row, SEP)?;
        }
        out.flush()
    })();
    io_res.map_err(|e| TrendError::write(path, e))
}

/// A hand-edited file may lack the final newline; appending straight onto it
/// would fuse two records.
fn ends_with_newline(path: &Path) -> io::Result<bool> {
    let mut f = File::open(path)?;
    if f.metadata()?.len() == 0 {
        return Ok(true);
    }
    f.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    f.read_exact(&mut last)?;
    Ok(matches!(last[0], b'\n' | b'\r'))
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(TrendError::write(
            dir,
            io::Error::new(io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| TrendError::write(dir, e))?;
    }
    Ok(())
}
