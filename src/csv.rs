// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

pub const SEP: char = ',';

/// Files are written with a UTF-8 BOM so spreadsheet tools pick the right encoding.
pub const BOM: &str = "\u{feff}";

/* ---------------- Parsing ---------------- */

/// One parsed record and the 1-based line it started on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Minimal CSV parser (quotes + CRLF tolerant, leading BOM stripped).
/// Blank lines are dropped; an unterminated quote swallows the rest of the text
/// into the last field rather than failing.
pub fn parse_records(text: &str, sep: char) -> Vec<Record> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut records = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut row_start = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // "" escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    records.push(Record { line: row_start, fields: take(&mut row) });
                } else {
                    row.clear();
                }
                line += 1;
                row_start = line;
            }
            c => {
                if c == '\n' { line += 1; }
                field.push(c);
            }
        }
    }

    // Trailing record without a final newline
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        records.push(Record { line: row_start, fields: row });
    }

    records
}

/// Split off the header record, if any.
pub fn split_header(mut records: Vec<Record>) -> (Option<Vec<String>>, Vec<Record>) {
    if records.is_empty() { return (None, records); }
    let header = records.remove(0).fields
        .into_iter()
        .map(|h| s!(h.trim()))
        .collect();
    (Some(header), records)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Render a full table (optional header + rows) to a String.
pub fn rows_to_string(headers: Option<&[String]>, rows: &[Vec<String>], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
