//! The closed set of content types the platform publishes.
//!
//! Each type carries four names: a short `code` used in GUIDs, a `value`
//! used in JSON/YAML and on the command line, a plural `tag` used for file
//! names, and a human-readable `title`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    Organisation,
    Video,
    Roundup,
    Post,
    Event,
    WhitePaper,
    Ebook,
    Project,
    Tool,
    Job,
    Publication,
}

impl ContentType {
    /// Every content type, in declaration order.
    pub const ALL: [ContentType; 11] = [
        ContentType::Organisation,
        ContentType::Video,
        ContentType::Roundup,
        ContentType::Post,
        ContentType::Event,
        ContentType::WhitePaper,
        ContentType::Ebook,
        ContentType::Project,
        ContentType::Tool,
        ContentType::Job,
        ContentType::Publication,
    ];

    /// Code, value, tag, title.
    fn names(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            ContentType::Organisation => ("ORG", "organisation", "organisations", "Organisation"),
            ContentType::Video => ("VID", "video", "videos", "Video"),
            ContentType::Roundup => ("RUP", "roundup", "roundups", "Roundup"),
            ContentType::Post => ("PST", "post", "posts", "Post"),
            ContentType::Event => ("EVT", "event", "events", "Event"),
            ContentType::WhitePaper => ("WPR", "white-paper", "white-papers", "White Paper"),
            ContentType::Ebook => ("EBK", "ebook", "ebooks", "eBook"),
            ContentType::Project => ("PRJ", "project", "projects", "Project"),
            ContentType::Tool => ("TOL", "tool", "tools", "Tool"),
            ContentType::Job => ("JOB", "job", "jobs", "Job"),
            ContentType::Publication => ("PUB", "publication", "publications", "Publication"),
        }
    }

    pub fn code(self) -> &'static str {
        self.names().0
    }

    pub fn value(self) -> &'static str {
        self.names().1
    }

    pub fn tag(self) -> &'static str {
        self.names().2
    }

    pub fn title(self) -> &'static str {
        self.names().3
    }

    /// Position in [`ContentType::ALL`]; also the bit used in tab masks.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the type whose value is `value`, or `None`.
    pub fn from_value(value: &str) -> Option<ContentType> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }

    pub fn from_code(code: &str) -> Option<ContentType> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// True exactly when [`ContentType::from_value`] finds a type.
    pub fn contains(value: &str) -> bool {
        Self::from_value(value).is_some()
    }

    /// White papers, ebooks and generic publications share one model.
    pub fn is_publication(self) -> bool {
        matches!(
            self,
            ContentType::WhitePaper | ContentType::Ebook | ContentType::Publication
        )
    }

    /// Base file name for exports of this type for one organisation.
    pub fn file_name(self, org_code: &str) -> String {
        format!("{}-{}", org_code.to_lowercase(), self.tag())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    /// Accepts either the value (`white-paper`) or the code (`WPR`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_value(s)
            .or_else(|| Self::from_code(s))
            .ok_or_else(|| ContentError::UnknownContentType(s.to_string()))
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
