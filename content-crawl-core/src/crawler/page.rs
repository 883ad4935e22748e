use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::extractor::FieldExtractor;
use super::ExtractedFields;
use crate::error::ContentError;

/// Which view of a page a field set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// List pages: one teaser per matched item.
    Teasers,
    /// Detail pages: one article per page.
    Articles,
}

impl FromStr for Section {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teasers" | "teaser" => Ok(Section::Teasers),
            "articles" | "article" => Ok(Section::Articles),
            other => Err(ContentError::InvalidConfig(format!(
                "unknown page section '{other}', expected 'teasers' or 'articles'"
            ))),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Teasers => "teasers",
            Section::Articles => "articles",
        })
    }
}

/// Named extractors for one section of a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSet {
    /// Selector for the repeating item container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldExtractor>,
}

impl FieldSet {
    pub fn field(&self, name: &str) -> Option<&FieldExtractor> {
        self.fields.get(name)
    }

    /// Runs each named extractor over the raw text scraped for that name.
    /// Fields with no raw text, or whose extractor yields nothing, are omitted.
    pub fn apply(&self, raw: &BTreeMap<String, String>) -> ExtractedFields {
        self.fields
            .iter()
            .filter_map(|(name, extractor)| {
                let value = raw.get(name).and_then(|text| extractor.extract(text));
                if value.is_none() {
                    tracing::debug!(field = %name, "No value extracted");
                }
                value.map(|v| (name.clone(), v))
            })
            .collect()
    }
}

/// One web page to scrape and how to read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerWebPage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teasers: Option<FieldSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<FieldSet>,
    /// Locates the link to the next listing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<FieldExtractor>,
}

impl CrawlerWebPage {
    pub fn section(&self, section: Section) -> Option<&FieldSet> {
        match section {
            Section::Teasers => self.teasers.as_ref(),
            Section::Articles => self.articles.as_ref(),
        }
    }

    pub fn has_teasers(&self) -> bool {
        self.teasers.is_some()
    }

    pub fn has_articles(&self) -> bool {
        self.articles.is_some()
    }
}
