//! # content-crawl CLI
//!
//! Command parsing and orchestration. Every model, row layout and extractor
//! lives in `content-crawl-core`; this module only reads files, calls into the
//! core and prints results.
//!
//! Programmatic and test callers can build a [`Cli`] directly and pass it to
//! [`run`], writing output to any `io::Write`.
use crate::load_config::load_config;
use crate::sink::TsvFileSink;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use content_crawl_core::content_type::ContentType;
use content_crawl_core::crawler::Section;
use content_crawl_core::export::export_items;
use content_crawl_core::item::ContentItem;
use content_crawl_core::row::split_tsv;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// CLI for content-crawl: check crawler configs and move content between rows and JSON.
#[derive(Parser)]
#[clap(
    name = "content-crawl",
    version,
    about = "Validate crawler configs, try field extractors and convert content rows"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate a crawler config, printing one line per target
    Validate {
        /// Path to the YAML crawler config
        #[clap(long)]
        config: PathBuf,
    },
    /// Run one configured field extractor over some text
    Extract {
        #[clap(long)]
        config: PathBuf,
        /// Organisation code of the target
        #[clap(long)]
        organisation: String,
        #[clap(long)]
        content_type: ContentType,
        /// Field name within the section
        #[clap(long)]
        field: String,
        #[clap(long, default_value_t = Section::Teasers)]
        section: Section,
        /// Text the extractor is applied to
        #[clap(long)]
        text: String,
    },
    /// Parse tab-separated rows into content items and print them as JSON lines
    Import {
        #[clap(long)]
        content_type: ContentType,
        /// Path to the TSV file, one row per line
        #[clap(long)]
        rows: PathBuf,
    },
    /// Read JSON lines of content items and write one TSV file per content type
    Export {
        /// Path to the JSON lines file
        #[clap(long)]
        items: PathBuf,
        #[clap(long)]
        output_dir: PathBuf,
        /// File name prefix, usually an organisation code
        #[clap(long, default_value = "all")]
        prefix: String,
    },
}

/// Runs a command, printing to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

pub fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Validate { config } => {
            tracing::info!(command = "validate", "Validating crawler config");
            let config = load_config(&config)?;
            for target in &config.targets {
                writeln!(
                    out,
                    "{}\t{}\t{}\tpages={}\tsites={}\t{}",
                    target.organisation,
                    target.content_type,
                    config.provider_for(target).unwrap_or("-"),
                    target.pages.len(),
                    if target.sites.is_empty() {
                        "all".to_string()
                    } else {
                        target
                            .sites
                            .iter()
                            .map(i64::to_string)
                            .collect::<Vec<_>>()
                            .join(",")
                    },
                    if target.enabled { "enabled" } else { "disabled" },
                )?;
            }
            writeln!(out, "{} targets OK", config.targets.len())?;
            Ok(())
        }
        Commands::Extract {
            config,
            organisation,
            content_type,
            field,
            section,
            text,
        } => {
            tracing::info!(command = "extract", %organisation, %content_type, %field, "Running extractor");
            let config = load_config(&config)?;
            let target = config
                .find(&organisation, content_type)
                .ok_or_else(|| anyhow!("no {content_type} target for organisation {organisation}"))?;
            let extractor = target
                .field(section, &field)
                .ok_or_else(|| anyhow!("no field '{field}' in {section} of {organisation}/{content_type}"))?;
            match extractor.extract(&text) {
                Some(value) => writeln!(out, "{value}")?,
                None => {
                    tracing::warn!(%field, "Extractor produced no value");
                    return Err(anyhow!("no value extracted for field '{field}'"));
                }
            }
            Ok(())
        }
        Commands::Import { content_type, rows } => {
            tracing::info!(command = "import", %content_type, rows_path = ?rows, "Importing rows");
            let content = fs::read_to_string(&rows)
                .with_context(|| format!("Failed to read rows file {rows:?}"))?;
            let mut imported = 0usize;
            for (line_no, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let cells = split_tsv(line);
                let mut item = ContentItem::from_row(content_type, &cells).map_err(|e| {
                    tracing::error!(line = line_no + 1, error = %e, "Failed to import row");
                    anyhow!("line {}: {e}", line_no + 1)
                })?;
                item.content_mut().init();
                writeln!(out, "{}", item.to_json()?)?;
                imported += 1;
            }
            tracing::info!(command = "import", imported, "Import complete");
            Ok(())
        }
        Commands::Export {
            items,
            output_dir,
            prefix,
        } => {
            tracing::info!(command = "export", items_path = ?items, output_dir = ?output_dir, "Exporting items");
            let content = fs::read_to_string(&items)
                .with_context(|| format!("Failed to read items file {items:?}"))?;
            let mut parsed = Vec::new();
            for (line_no, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let value: serde_json::Value = serde_json::from_str(line)
                    .with_context(|| format!("line {}: invalid JSON", line_no + 1))?;
                let item = ContentItem::from_json(&value)
                    .map_err(|e| anyhow!("line {}: {e}", line_no + 1))?;
                parsed.push(item);
            }

            let mut sink = TsvFileSink::new(&output_dir, &prefix);
            match export_items(&parsed, &mut sink) {
                Ok(report) => {
                    tracing::info!(command = "export", ?report, "Export complete");
                    for path in sink.written() {
                        writeln!(out, "{}", path.display())?;
                    }
                    writeln!(out, "exported {} items", report.total())?;
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "export", error = %e, "Export failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
