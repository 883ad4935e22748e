//! Positional spreadsheet-row import and export.
//!
//! Each content type documents its column layout on its `RowRecord` impl.
//! Rows are plain `&[String]`; the CLI reads them from tab-separated files.

use chrono::{DateTime, Utc};

use crate::error::{ContentError, ContentResult};

/// A type that can be read from, and written back to, a spreadsheet row.
pub trait RowRecord: Sized {
    /// Layout name used in errors.
    const KIND: &'static str;
    /// Minimum number of columns `from_row` reads.
    const COLUMNS: usize;

    fn from_row(row: &[String]) -> ContentResult<Self>;

    /// Always exactly `COLUMNS` cells, readable by `from_row`.
    ///
    /// Cells are trimmed when read back, so leading or trailing whitespace
    /// in a text field does not survive a round trip. Sinks that cannot hold
    /// tabs or line breaks may also flatten them.
    fn to_row(&self) -> Vec<String>;
}

/// Length-checked view over one row.
pub struct Row<'a> {
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Fails with `RowTooShort` when fewer than `expected` cells are present.
    pub fn new(kind: &'static str, cells: &'a [String], expected: usize) -> ContentResult<Self> {
        if cells.len() < expected {
            tracing::debug!(kind, expected, actual = cells.len(), "Rejecting short row");
            return Err(ContentError::RowTooShort {
                kind,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { cells })
    }

    pub fn text(&self, index: usize) -> String {
        self.cells[index].trim().to_string()
    }

    /// `"1"` is true, anything else false.
    pub fn flag(&self, index: usize) -> bool {
        self.cells[index].trim() == "1"
    }

    /// Empty cells are unassigned ids (`-1`).
    pub fn id(&self, index: usize) -> ContentResult<i64> {
        Ok(self
            .optional_int(index, "id")?
            .unwrap_or(crate::content::UNASSIGNED_ID))
    }

    pub fn int(&self, index: usize, field: &'static str) -> ContentResult<i64> {
        Ok(self.optional_int(index, field)?.unwrap_or_default())
    }

    pub fn optional_int(&self, index: usize, field: &'static str) -> ContentResult<Option<i64>> {
        let raw = self.cells[index].trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| ContentError::InvalidNumber {
                field,
                value: raw.to_string(),
            })
    }

    pub fn date(&self, index: usize, field: &'static str) -> ContentResult<Option<DateTime<Utc>>> {
        crate::time::parse_utc(field, &self.cells[index])
    }

    pub fn list(&self, index: usize) -> Vec<String> {
        split_list(&self.cells[index])
    }
}

/// Splits a comma-separated cell, dropping blanks.
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(",")
}

pub fn flag_cell(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

pub fn optional_int_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Splits one tab-separated line into cells.
pub fn split_tsv(line: &str) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split('\t')
        .map(str::to_string)
        .collect()
}
