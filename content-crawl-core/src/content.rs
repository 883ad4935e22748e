//! # content: the shared core of every published item
//!
//! Every concrete content type (see [`crate::article`] and [`crate::resource`])
//! is a flat struct that composes a [`ContentCore`] and implements the
//! [`Content`] trait. The trait exposes the accessor set common to all types
//! (title, summary, published date, status, GUID) so callers can work with
//! `&dyn Content` without caring which kind of item they hold.
//!
//! ## Views
//! - [`ContentSummary`]: the teaser/list view (title, summary, url, date).
//! - [`ContentDetails`]: the detail view (body, image, author).
//!
//! ## Lifecycle
//! - `ContentCore::new()` starts with an unassigned id (`-1`) and no uuid.
//! - `init()` assigns a uuid once; a uuid that is already set is never replaced.
//! - Copies are plain `Clone`s.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::content_type::ContentType;
use crate::crawler::ExtractedFields;
use crate::error::{ContentError, ContentResult};
use crate::fields::{FieldMap, FieldName};
use crate::lenient;
use crate::row::{flag_cell, Row};

/// Id of an item that has not been stored yet.
pub const UNASSIGNED_ID: i64 = -1;

/// Number of leading columns every content row shares.
pub const CORE_COLUMNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    #[default]
    New,
    Pending,
    Staged,
    Deployed,
    Archived,
    Skipped,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::New => "NEW",
            ContentStatus::Pending => "PENDING",
            ContentStatus::Staged => "STAGED",
            ContentStatus::Deployed => "DEPLOYED",
            ContentStatus::Archived => "ARCHIVED",
            ContentStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = ContentError;

    /// Case-insensitive; an empty string is `New`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NEW" => Ok(ContentStatus::New),
            "PENDING" => Ok(ContentStatus::Pending),
            "STAGED" => Ok(ContentStatus::Staged),
            "DEPLOYED" => Ok(ContentStatus::Deployed),
            "ARCHIVED" => Ok(ContentStatus::Archived),
            "SKIPPED" => Ok(ContentStatus::Skipped),
            _ => Err(ContentError::UnknownStatus(s.trim().to_string())),
        }
    }
}

/// Teaser view of an item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentSummary {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::date")]
    pub published_date: Option<DateTime<Utc>>,
}

impl ContentSummary {
    /// Builds a teaser from crawler output keyed by JSON field names.
    pub fn from_extracted(fields: &ExtractedFields) -> ContentResult<Self> {
        let text = |name: FieldName| fields.get(name.key()).cloned().unwrap_or_default();
        let published_date = match fields.get(FieldName::PublishedDate.key()) {
            Some(raw) => crate::time::parse_utc("publishedDate", raw)?,
            None => None,
        };
        Ok(Self {
            title: text(FieldName::Title),
            summary: text(FieldName::Summary),
            url: text(FieldName::Url),
            published_date,
        })
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Detail view of an item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDetails {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub image_url: String,
}

/// Fields shared by every content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentCore {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    uuid: String,
    #[serde(deserialize_with = "lenient::int")]
    pub site_id: i64,
    #[serde(
        rename = "code",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient::string"
    )]
    pub org_code: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub published: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub status: ContentStatus,
    #[serde(flatten)]
    pub summary: ContentSummary,
}

impl Default for ContentCore {
    fn default() -> Self {
        Self {
            id: UNASSIGNED_ID,
            uuid: String::new(),
            site_id: 0,
            org_code: String::new(),
            published: false,
            status: ContentStatus::New,
            summary: ContentSummary::default(),
        }
    }
}

impl ContentCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh uuid unless one is already set.
    pub fn init(&mut self) {
        if self.uuid.is_empty() {
            self.uuid = uuid::Uuid::new_v4().to_string();
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Sets the uuid only if none is set yet. Returns whether it changed.
    pub fn set_uuid(&mut self, uuid: impl Into<String>) -> bool {
        if !self.uuid.is_empty() {
            return false;
        }
        self.uuid = uuid.into();
        !self.uuid.is_empty()
    }

    pub fn has_id(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    pub fn has_uuid(&self) -> bool {
        !self.uuid.is_empty()
    }

    pub fn has_org_code(&self) -> bool {
        !self.org_code.is_empty()
    }

    /// Reads the shared leading columns:
    /// `[0] id, [1] uuid, [2] site id, [3] org code, [4] published,
    /// [5] status, [6] published date, [7] title, [8] summary, [9] url`.
    pub fn from_row(row: &Row<'_>) -> ContentResult<Self> {
        Ok(Self {
            id: row.id(0)?,
            uuid: row.text(1),
            site_id: row.int(2, "siteId")?,
            org_code: row.text(3),
            published: row.flag(4),
            status: row.text(5).parse()?,
            summary: ContentSummary {
                published_date: row.date(6, "publishedDate")?,
                title: row.text(7),
                summary: row.text(8),
                url: row.text(9),
            },
        })
    }

    /// The shared leading columns, in `from_row` order.
    pub fn row_cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.uuid.clone(),
            self.site_id.to_string(),
            self.org_code.clone(),
            flag_cell(self.published),
            self.status.to_string(),
            crate::time::format_row(self.summary.published_date.as_ref()),
            self.summary.title.clone(),
            self.summary.summary.clone(),
            self.summary.url.clone(),
        ]
    }
}

/// Formats `"<typeCode>-<orgCode>-<id>"` with the id zero-padded to five digits.
pub fn guid(content_type: ContentType, org_code: &str, id: i64) -> String {
    format!("{}-{}-{:05}", content_type.code(), org_code, id)
}

/// Deserializes any content type from a JSON object with lenient field rules.
pub fn from_json<T: DeserializeOwned>(value: &Value) -> ContentResult<T> {
    Ok(T::deserialize(value)?)
}

/// Accessors shared by every concrete content type.
pub trait Content {
    fn content_type(&self) -> ContentType;

    fn core(&self) -> &ContentCore;

    fn core_mut(&mut self) -> &mut ContentCore;

    /// Adds the type-specific fields to a rendered field map.
    fn extend_fields(&self, fields: &mut FieldMap);

    fn to_json(&self) -> ContentResult<Value>;

    fn title(&self) -> &str {
        &self.core().summary.title
    }

    fn summary(&self) -> &str {
        &self.core().summary.summary
    }

    fn url(&self) -> &str {
        &self.core().summary.url
    }

    fn published_date(&self) -> Option<&DateTime<Utc>> {
        self.core().summary.published_date.as_ref()
    }

    fn status(&self) -> ContentStatus {
        self.core().status
    }

    fn set_status(&mut self, status: ContentStatus) {
        self.core_mut().status = status;
    }

    fn org_code(&self) -> &str {
        &self.core().org_code
    }

    fn guid(&self) -> String {
        guid(self.content_type(), &self.core().org_code, self.core().id)
    }

    fn init(&mut self) {
        self.core_mut().init();
    }

    /// Renders the item for output; empty optional fields are omitted.
    fn to_fields(&self) -> FieldMap {
        let core = self.core();
        let mut fields = FieldMap::new();
        fields
            .put(FieldName::Type, self.content_type().value())
            .put_opt(FieldName::Code, core.org_code.as_str())
            .put(FieldName::Id, core.id.to_string())
            .put_opt(FieldName::Uuid, core.uuid())
            .put(FieldName::Guid, self.guid())
            .put(FieldName::SiteId, core.site_id.to_string())
            .put_opt(
                FieldName::PublishedDate,
                crate::time::format_row(core.summary.published_date.as_ref()),
            )
            .put_opt(FieldName::Title, core.summary.title.as_str())
            .put_opt(FieldName::Summary, core.summary.summary.as_str())
            .put_opt(FieldName::Url, core.summary.url.as_str())
            .put(FieldName::Published, core.published.to_string())
            .put(FieldName::Status, core.status.as_str());
        self.extend_fields(&mut fields);
        fields
    }
}
