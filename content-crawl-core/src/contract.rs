//! # contract: the export seam
//!
//! This module defines the [`ContentSink`] trait: the destination that content
//! rows are written to when exporting (a spreadsheet, a TSV file per content
//! type, an in-memory buffer in tests).
//!
//! ## Interface & Extensibility
//! - Implement [`ContentSink`] for each new destination.
//! - Rows are written in the positional layout documented on each type's
//!   `RowRecord` impl, grouped per content type between `begin` and `finish`.
//! - Errors are boxed trait objects; the exporter wraps them with the
//!   content type being written.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so consumers get `MockContentSink`
//!   for deterministic tests (exported under the `test-export-mocks` feature).

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::content_type::ContentType;

/// Error type returned by sink implementations.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// A destination for exported content rows.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ContentSink {
    /// Called once before the first row of `content_type`.
    fn begin(&mut self, content_type: ContentType) -> Result<(), SinkError>;

    fn write_row(&mut self, content_type: ContentType, row: &[String]) -> Result<(), SinkError>;

    /// Called once after the last row of `content_type`.
    fn finish(&mut self, content_type: ContentType) -> Result<(), SinkError>;
}
