//! # crawler: declarative scrape configuration
//!
//! A crawler config is a YAML file describing, per organisation and content
//! type, which pages to visit and how to read fields from them. This module
//! only models and validates that description and applies field extraction
//! to text a crawler has already scraped; fetching pages happens elsewhere.
//!
//! ```yaml
//! provider: static
//! targets:
//!   - organisation: ACME
//!     type: post
//!     sites: [1]
//!     pages:
//!       - url: https://acme.example/blog
//!         teasers:
//!           selector: div.post
//!           fields:
//!             title: { selector: h2 }
//!             publishedDate: { selector: time, expr: '(\d{4}-\d{2}-\d{2})', format: '$1' }
//! ```

mod extractor;
mod link_text;
mod page;
mod target;

use std::collections::BTreeMap;

pub use extractor::{FieldExtractor, MatchType};
pub use link_text::LinkText;
pub use page::{CrawlerWebPage, FieldSet, Section};
pub use target::{CrawlerConfig, CrawlerTarget};

/// Field name to extracted value.
pub type ExtractedFields = BTreeMap<String, String>;
