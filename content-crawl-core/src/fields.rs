//! Output field names and the ordered field map every content type renders to.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One variant per key of the JSON surface. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Type,
    Code,
    Id,
    Uuid,
    Guid,
    SiteId,
    PublishedDate,
    Title,
    Summary,
    Url,
    Published,
    Status,
    TrackedBy,
    Social,
    Author,
    Body,
    ImageUrl,
    Provider,
    VideoId,
    VideoType,
    Duration,
    Thumbnail,
    Location,
    Remote,
    StartDate,
    EndDate,
    Website,
    Repository,
    FileUrl,
    Technologies,
}

impl FieldName {
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Type => "type",
            FieldName::Code => "code",
            FieldName::Id => "id",
            FieldName::Uuid => "uuid",
            FieldName::Guid => "guid",
            FieldName::SiteId => "siteId",
            FieldName::PublishedDate => "publishedDate",
            FieldName::Title => "title",
            FieldName::Summary => "summary",
            FieldName::Url => "url",
            FieldName::Published => "published",
            FieldName::Status => "status",
            FieldName::TrackedBy => "trackedBy",
            FieldName::Social => "social",
            FieldName::Author => "author",
            FieldName::Body => "body",
            FieldName::ImageUrl => "imageUrl",
            FieldName::Provider => "provider",
            FieldName::VideoId => "videoId",
            FieldName::VideoType => "videoType",
            FieldName::Duration => "duration",
            FieldName::Thumbnail => "thumbnail",
            FieldName::Location => "location",
            FieldName::Remote => "remote",
            FieldName::StartDate => "startDate",
            FieldName::EndDate => "endDate",
            FieldName::Website => "website",
            FieldName::Repository => "repository",
            FieldName::FileUrl => "fileUrl",
            FieldName::Technologies => "technologies",
        }
    }
}

/// Rendered view of a content item, keyed by [`FieldName`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: BTreeMap<FieldName, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always records the field, even when the value is empty.
    pub fn put(&mut self, name: FieldName, value: impl Into<String>) -> &mut Self {
        self.values.insert(name, value.into());
        self
    }

    /// Records the field only when the value is non-empty.
    pub fn put_opt(&mut self, name: FieldName, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(name, value);
        }
        self
    }

    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Flat JSON object of string values.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.key().to_string(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
