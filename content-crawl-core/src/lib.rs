#![doc = "content-crawl-core: content domain model and crawler configuration for content-crawl."]

//! This crate contains the data models shared by every part of content-crawl:
//! organisations, the concrete content types (articles and resources), their
//! JSON / spreadsheet-row / field-map surfaces, and the declarative crawler
//! configuration used to scrape content for each organisation.
//!
//! # Usage
//! Depend on this crate for all model, parsing and export code. The CLI crate
//! only adds file handling and argument parsing on top.

pub mod article;
pub mod content;
pub mod content_type;
pub mod contract;
pub mod crawler;
pub mod error;
pub mod export;
pub mod fields;
pub mod item;
pub mod organisation;
pub mod resource;
pub mod row;
pub mod settings;
pub mod time;
pub mod video;

mod lenient;

pub use content::{Content, ContentCore, ContentDetails, ContentStatus, ContentSummary};
pub use content_type::ContentType;
pub use error::{ContentError, ContentResult};
pub use item::ContentItem;
