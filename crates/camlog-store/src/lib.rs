use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_HEADER: &str = "filename,directory,timestamp";
pub const DEFAULT_CSV_NAME: &str = "DATA.csv";

/// One export, as remembered by the log.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRecord {
    pub filename: String,
    pub directory: PathBuf,
    pub timestamp: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access export log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("export log {path} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Flat CSV log of exports, keyed by filename.
///
/// Reads and writes are whole-file; the file is created with the header row
/// on first write. Filename is unique within the file, so an upsert for an
/// existing filename replaces that row in place.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> Result<Vec<ExportRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut records = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if index == 0 {
                if line != CSV_HEADER {
                    return Err(self.malformed(1, format!("expected header {CSV_HEADER:?}")));
                }
                continue;
            }
            if line.is_empty() {
                continue;
            }
            records.push(self.parse_record(index + 1, line)?);
        }
        Ok(records)
    }

    /// Insert `record`, or replace the row with the same filename.
    pub fn upsert(&self, record: &ExportRecord) -> Result<UpsertOutcome, StoreError> {
        let mut records = self.records()?;
        let outcome = match records
            .iter_mut()
            .find(|row| row.filename == record.filename)
        {
            Some(row) => {
                *row = record.clone();
                UpsertOutcome::Updated
            }
            None => {
                records.push(record.clone());
                UpsertOutcome::Inserted
            }
        };
        self.write_all(&records)?;
        Ok(outcome)
    }

    fn write_all(&self, records: &[ExportRecord]) -> Result<(), StoreError> {
        let mut text = String::from(CSV_HEADER);
        text.push('\n');
        for record in records {
            text.push_str(&format_field(&record.filename));
            text.push(',');
            text.push_str(&format_field(&record.directory.display().to_string()));
            text.push(',');
            text.push_str(&record.timestamp.to_rfc3339());
            text.push('\n');
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn parse_record(&self, line_number: usize, line: &str) -> Result<ExportRecord, StoreError> {
        let fields =
            parse_row(line).map_err(|reason| self.malformed(line_number, reason))?;
        if fields.len() != 3 {
            return Err(self.malformed(
                line_number,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }
        let timestamp = DateTime::parse_from_rfc3339(&fields[2])
            .map_err(|err| self.malformed(line_number, format!("bad timestamp: {err}")))?
            .with_timezone(&Utc);
        Ok(ExportRecord {
            filename: fields[0].clone(),
            directory: PathBuf::from(&fields[1]),
            timestamp,
        })
    }

    fn malformed(&self, line: usize, reason: String) -> StoreError {
        StoreError::Malformed {
            path: self.path.clone(),
            line,
            reason,
        }
    }
}

fn format_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn parse_row(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if quoted {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    quoted = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                ',' => fields.push(std::mem::take(&mut current)),
                '"' if current.is_empty() => quoted = true,
                _ => current.push(c),
            }
        }
    }
    if quoted {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(current);
    Ok(fields)
}
