//! CSV-backed activity log: one `focus_log_YYYY-MM-DD.csv` file per day.
//!
//! Files are created with `create_new` and afterwards only opened in append
//! mode, so an existing row is never rewritten.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use super::activity_log::{
    ActivityKind, ActivityRecord, ActivitySink, DATE_FORMAT, TIMESTAMP_FORMAT,
};
use crate::error::PersistenceError;

const FILE_PREFIX: &str = "focus_log_";
const FILE_SUFFIX: &str = ".csv";
const HEADER: [&str; 4] = ["Timestamp", "Event", "Detail", "Remarks"];
const LINE_END: &str = "\r\n";

#[derive(Debug, Clone)]
pub struct CsvActivityLog {
    dir: PathBuf,
}

impl CsvActivityLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "{FILE_PREFIX}{}{FILE_SUFFIX}",
            date.format(DATE_FORMAT)
        ))
    }

    /// Read back every record of one day. A missing store reads as empty.
    pub fn read_day(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>, PersistenceError> {
        let path = self.path_for(date);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(PersistenceError::ReadFailed { path, source }),
        };

        let mut records = Vec::new();
        for (index, row) in parse_rows(&content).into_iter().enumerate() {
            let line = index + 1;
            if index == 0 && row.first().map(String::as_str) == Some(HEADER[0]) {
                continue;
            }
            let malformed = |message: String| PersistenceError::Malformed {
                path: path.clone(),
                line,
                message,
            };
            let [timestamp, kind, detail, remarks]: [String; 4] = row
                .try_into()
                .map_err(|row: Vec<String>| malformed(format!("expected 4 columns, found {}", row.len())))?;
            let timestamp = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
                .map_err(|e| malformed(format!("bad timestamp '{timestamp}': {e}")))?;
            let kind = kind.parse::<ActivityKind>().map_err(malformed)?;
            records.push(ActivityRecord {
                timestamp,
                kind,
                detail,
                remarks,
            });
        }
        Ok(records)
    }

    /// Dates that have a store, oldest first.
    pub fn days(&self) -> Result<Vec<NaiveDate>, PersistenceError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::ReadFailed {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut days: Vec<NaiveDate> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let date = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
                NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
            })
            .collect();
        days.sort();
        Ok(days)
    }
}

impl ActivitySink for CsvActivityLog {
    fn ensure_store(&mut self, header: &ActivityRecord) -> Result<bool, PersistenceError> {
        let path = self.path_for(header.date());
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::CreateFailed {
            path: self.dir.clone(),
            source,
        })?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                // A zero-length store never received its header rows.
                let len = fs::metadata(&path)
                    .map_err(|source| PersistenceError::ReadFailed {
                        path: path.clone(),
                        source,
                    })?
                    .len();
                if len > 0 {
                    return Ok(false);
                }
                warn!(path = %path.display(), "activity log store is empty, rewriting header");
                OpenOptions::new()
                    .append(true)
                    .open(&path)
                    .map_err(|source| PersistenceError::CreateFailed {
                        path: path.clone(),
                        source,
                    })?
            }
            Err(source) => return Err(PersistenceError::CreateFailed { path, source }),
        };

        let mut content = format_row(&HEADER);
        content.push_str(&format_record(header));
        if let Err(source) = file.write_all(content.as_bytes()) {
            drop(file);
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "could not remove incomplete store");
            }
            return Err(PersistenceError::CreateFailed { path, source });
        }
        debug!(path = %path.display(), "created activity log store");
        Ok(true)
    }

    fn append(&mut self, date: NaiveDate, record: &ActivityRecord) -> Result<(), PersistenceError> {
        let path = self.path_for(date);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|source| PersistenceError::AppendFailed {
                path: path.clone(),
                source,
            })?;
        file.write_all(format_record(record).as_bytes())
            .map_err(|source| PersistenceError::AppendFailed { path, source })
    }
}

fn format_record(record: &ActivityRecord) -> String {
    format_row(&[
        &record.timestamp_text(),
        record.kind.as_str(),
        &record.detail,
        &record.remarks,
    ])
}

fn format_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push_str(LINE_END);
    row
}

fn csv_escape(s: &str) -> String {
    let needs_quote = s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r');
    if !needs_quote {
        return s.to_string();
    }
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Split CSV text into rows of fields. Quoted fields may span lines.
fn parse_rows(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
