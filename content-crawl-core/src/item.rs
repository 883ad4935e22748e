//! [`ContentItem`]: one value that can hold any concrete content type.
//!
//! Dispatch happens by exhaustive `match` on the variant; the JSON form is the
//! variant's own object plus a `"type"` key carrying the content type value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::article::{PostArticle, RoundupArticle, VideoArticle};
use crate::content::{from_json, Content};
use crate::content_type::ContentType;
use crate::error::{ContentError, ContentResult};
use crate::resource::{EventResource, JobResource, ProjectResource, PublicationResource, ToolResource};
use crate::row::RowRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Roundup(RoundupArticle),
    Post(PostArticle),
    Video(VideoArticle),
    Job(JobResource),
    Event(EventResource),
    Tool(ToolResource),
    Project(ProjectResource),
    Publication(PublicationResource),
}

impl ContentItem {
    pub fn content(&self) -> &dyn Content {
        match self {
            ContentItem::Roundup(c) => c,
            ContentItem::Post(c) => c,
            ContentItem::Video(c) => c,
            ContentItem::Job(c) => c,
            ContentItem::Event(c) => c,
            ContentItem::Tool(c) => c,
            ContentItem::Project(c) => c,
            ContentItem::Publication(c) => c,
        }
    }

    pub fn content_mut(&mut self) -> &mut dyn Content {
        match self {
            ContentItem::Roundup(c) => c,
            ContentItem::Post(c) => c,
            ContentItem::Video(c) => c,
            ContentItem::Job(c) => c,
            ContentItem::Event(c) => c,
            ContentItem::Tool(c) => c,
            ContentItem::Project(c) => c,
            ContentItem::Publication(c) => c,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content().content_type()
    }

    /// Reads a spreadsheet row using the layout for `content_type`.
    pub fn from_row(content_type: ContentType, row: &[String]) -> ContentResult<Self> {
        Ok(match content_type {
            ContentType::Roundup => ContentItem::Roundup(RoundupArticle::from_row(row)?),
            ContentType::Post => ContentItem::Post(PostArticle::from_row(row)?),
            ContentType::Video => ContentItem::Video(VideoArticle::from_row(row)?),
            ContentType::Job => ContentItem::Job(JobResource::from_row(row)?),
            ContentType::Event => ContentItem::Event(EventResource::from_row(row)?),
            ContentType::Tool => ContentItem::Tool(ToolResource::from_row(row)?),
            ContentType::Project => ContentItem::Project(ProjectResource::from_row(row)?),
            ContentType::WhitePaper | ContentType::Ebook | ContentType::Publication => {
                let publication = PublicationResource::from_row(row)?;
                if publication.content_type() != content_type {
                    tracing::debug!(
                        expected = %content_type,
                        found = %publication.content_type(),
                        "Publication row carries a different type than requested"
                    );
                    return Err(ContentError::TypeMismatch {
                        expected: content_type,
                        found: publication.content_type(),
                    });
                }
                ContentItem::Publication(publication)
            }
            ContentType::Organisation => {
                return Err(ContentError::UnknownContentType(
                    "organisation rows are not content items".to_string(),
                ))
            }
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        match self {
            ContentItem::Roundup(c) => c.to_row(),
            ContentItem::Post(c) => c.to_row(),
            ContentItem::Video(c) => c.to_row(),
            ContentItem::Job(c) => c.to_row(),
            ContentItem::Event(c) => c.to_row(),
            ContentItem::Tool(c) => c.to_row(),
            ContentItem::Project(c) => c.to_row(),
            ContentItem::Publication(c) => c.to_row(),
        }
    }

    /// The variant's JSON object with `"type"` added.
    pub fn to_json(&self) -> ContentResult<Value> {
        let mut value = self.content().to_json()?;
        if let Value::Object(map) = &mut value {
            map.insert(
                "type".to_string(),
                Value::String(self.content_type().value().to_string()),
            );
        }
        Ok(value)
    }

    /// Dispatches on the `"type"` key of a JSON object.
    pub fn from_json(value: &Value) -> ContentResult<Self> {
        let type_value = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ContentError::UnknownContentType("missing \"type\" key".to_string()))?;
        let content_type: ContentType = type_value.parse()?;
        Ok(match content_type {
            ContentType::Roundup => ContentItem::Roundup(from_json(value)?),
            ContentType::Post => ContentItem::Post(from_json(value)?),
            ContentType::Video => ContentItem::Video(from_json(value)?),
            ContentType::Job => ContentItem::Job(from_json(value)?),
            ContentType::Event => ContentItem::Event(from_json(value)?),
            ContentType::Tool => ContentItem::Tool(from_json(value)?),
            ContentType::Project => ContentItem::Project(from_json(value)?),
            ContentType::WhitePaper | ContentType::Ebook | ContentType::Publication => {
                ContentItem::Publication(from_json(value)?)
            }
            ContentType::Organisation => {
                return Err(ContentError::UnknownContentType(
                    "organisation objects are not content items".to_string(),
                ))
            }
        })
    }
}

impl Serialize for ContentItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContentItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ContentItem::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl From<RoundupArticle> for ContentItem {
    fn from(c: RoundupArticle) -> Self {
        ContentItem::Roundup(c)
    }
}

impl From<PostArticle> for ContentItem {
    fn from(c: PostArticle) -> Self {
        ContentItem::Post(c)
    }
}

impl From<VideoArticle> for ContentItem {
    fn from(c: VideoArticle) -> Self {
        ContentItem::Video(c)
    }
}

impl From<JobResource> for ContentItem {
    fn from(c: JobResource) -> Self {
        ContentItem::Job(c)
    }
}

impl From<EventResource> for ContentItem {
    fn from(c: EventResource) -> Self {
        ContentItem::Event(c)
    }
}

impl From<ToolResource> for ContentItem {
    fn from(c: ToolResource) -> Self {
        ContentItem::Tool(c)
    }
}

impl From<ProjectResource> for ContentItem {
    fn from(c: ProjectResource) -> Self {
        ContentItem::Project(c)
    }
}

impl From<PublicationResource> for ContentItem {
    fn from(c: PublicationResource) -> Self {
        ContentItem::Publication(c)
    }
}
