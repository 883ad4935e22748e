//! Writes content items to a [`ContentSink`], one group per content type.
//!
//! Groups are written in [`ContentType::ALL`] order and items keep their input
//! order within a group. The export stops at the first sink error.

use std::collections::BTreeMap;
use tracing::{error, info};

use crate::content_type::ContentType;
use crate::contract::{ContentSink, SinkError};
use crate::error::{ContentError, ContentResult};
use crate::item::ContentItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedGroup {
    pub content_type: ContentType,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub groups: Vec<ExportedGroup>,
}

impl ExportReport {
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.rows).sum()
    }

    pub fn rows_for(&self, content_type: ContentType) -> usize {
        self.groups
            .iter()
            .find(|g| g.content_type == content_type)
            .map_or(0, |g| g.rows)
    }
}

fn sink_error(content_type: ContentType, e: SinkError) -> ContentError {
    error!(content_type = %content_type, error = %e, "Sink rejected export");
    ContentError::Sink {
        content_type,
        reason: e.to_string(),
    }
}

pub fn export_items<S: ContentSink + ?Sized>(
    items: &[ContentItem],
    sink: &mut S,
) -> ContentResult<ExportReport> {
    let mut groups: BTreeMap<ContentType, Vec<&ContentItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.content_type()).or_default().push(item);
    }

    let mut report = ExportReport::default();
    for (content_type, group) in groups {
        sink.begin(content_type)
            .map_err(|e| sink_error(content_type, e))?;
        for item in &group {
            sink.write_row(content_type, &item.to_row())
                .map_err(|e| sink_error(content_type, e))?;
        }
        sink.finish(content_type)
            .map_err(|e| sink_error(content_type, e))?;
        info!(content_type = %content_type, rows = group.len(), "Exported content group");
        report.groups.push(ExportedGroup {
            content_type,
            rows: group.len(),
        });
    }
    Ok(report)
}
