//! A [`ContentSink`] that writes one tab-separated file per content type.

use content_crawl_core::content_type::ContentType;
use content_crawl_core::contract::{ContentSink, SinkError};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes `<prefix>-<tag>.tsv` files under `output_dir`.
pub struct TsvFileSink {
    output_dir: PathBuf,
    prefix: String,
    open: HashMap<ContentType, BufWriter<File>>,
    written: Vec<PathBuf>,
}

impl TsvFileSink {
    pub fn new<P: AsRef<Path>>(output_dir: P, prefix: &str) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            open: HashMap::new(),
            written: Vec::new(),
        }
    }

    pub fn path_for(&self, content_type: ContentType) -> PathBuf {
        self.output_dir
            .join(format!("{}.tsv", content_type.file_name(&self.prefix)))
    }

    /// Files finished so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

/// Tabs and line breaks inside a cell would break the row layout, so they
/// become spaces. Multi-line bodies come back as a single line.
fn clean_cell(cell: &str) -> String {
    cell.replace(['\t', '\r', '\n'], " ")
}

impl ContentSink for TsvFileSink {
    fn begin(&mut self, content_type: ContentType) -> Result<(), SinkError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(content_type);
        debug!(path = ?path, "Opening export file");
        let file = File::create(&path)?;
        self.open.insert(content_type, BufWriter::new(file));
        Ok(())
    }

    fn write_row(&mut self, content_type: ContentType, row: &[String]) -> Result<(), SinkError> {
        let writer = self
            .open
            .get_mut(&content_type)
            .ok_or_else(|| format!("no open file for {content_type}"))?;
        let line = row
            .iter()
            .map(|cell| clean_cell(cell))
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(writer, "{line}")?;
        Ok(())
    }

    fn finish(&mut self, content_type: ContentType) -> Result<(), SinkError> {
        let mut writer = self
            .open
            .remove(&content_type)
            .ok_or_else(|| format!("no open file for {content_type}"))?;
        writer.flush()?;
        let path = self.path_for(content_type);
        info!(path = ?path, "Wrote export file");
        self.written.push(path);
        Ok(())
    }
}
