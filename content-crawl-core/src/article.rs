//! Editorial content types: roundups, posts and videos.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{Content, ContentCore, ContentDetails, CORE_COLUMNS};
use crate::content_type::ContentType;
use crate::error::{ContentError, ContentResult};
use crate::fields::{FieldMap, FieldName};
use crate::lenient;
use crate::row::{join_list, optional_int_cell, Row, RowRecord};
use crate::video::{VideoDetails, VideoProvider, VideoType};

/// A curated roundup of links tracked on behalf of an organisation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoundupArticle {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub tracked_by: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub social: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::list")]
    pub technologies: Vec<String>,
}

impl RoundupArticle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_tracked_by(&self) -> bool {
        !self.tracked_by.is_empty()
    }

    pub fn has_social(&self) -> bool {
        !self.social.is_empty()
    }
}

impl Content for RoundupArticle {
    fn content_type(&self) -> ContentType {
        ContentType::Roundup
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::TrackedBy, self.tracked_by.as_str())
            .put_opt(FieldName::Social, self.social.as_str())
            .put_opt(FieldName::Technologies, join_list(&self.technologies));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] tracked by, [11] social, [12] technologies`.
impl RowRecord for RoundupArticle {
    const KIND: &'static str = "roundup";
    const COLUMNS: usize = CORE_COLUMNS + 3;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            tracked_by: row.text(10),
            social: row.text(11),
            technologies: row.list(12),
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.tracked_by.clone(),
            self.social.clone(),
            join_list(&self.technologies),
        ]);
        cells
    }
}

/// A blog post or news article.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostArticle {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(flatten)]
    pub details: ContentDetails,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::list")]
    pub technologies: Vec<String>,
}

impl PostArticle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Content for PostArticle {
    fn content_type(&self) -> ContentType {
        ContentType::Post
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::Author, self.details.author.as_str())
            .put_opt(FieldName::ImageUrl, self.details.image_url.as_str())
            .put_opt(FieldName::Body, self.details.body.as_str())
            .put_opt(FieldName::Technologies, join_list(&self.technologies));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten:
/// `[10] author, [11] image url, [12] body, [13] technologies`.
impl RowRecord for PostArticle {
    const KIND: &'static str = "post";
    const COLUMNS: usize = CORE_COLUMNS + 4;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            details: ContentDetails {
                author: row.text(10),
                image_url: row.text(11),
                body: row.text(12),
            },
            technologies: row.list(13),
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.details.author.clone(),
            self.details.image_url.clone(),
            self.details.body.clone(),
            join_list(&self.technologies),
        ]);
        cells
    }
}

/// A hosted video (webinar, demo, talk...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoArticle {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(flatten)]
    pub video: VideoDetails,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::list")]
    pub technologies: Vec<String>,
}

impl VideoArticle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a video from a provider URL, classifying it by title.
    /// Returns `None` when the URL is not from a known provider.
    pub fn from_url(url: &str, title: &str) -> Option<Self> {
        let (provider, video_id) = VideoProvider::from_url(url)?;
        let mut article = Self::new();
        article.core.summary.url = url.to_string();
        article.core.summary.title = title.to_string();
        article.video = VideoDetails {
            provider,
            video_id,
            video_type: VideoType::from_text(title),
            ..VideoDetails::default()
        };
        tracing::debug!(
            provider = provider.as_str(),
            video_id = %article.video.video_id,
            video_type = article.video.video_type.as_str(),
            "Classified video from URL"
        );
        Some(article)
    }
}

impl Content for VideoArticle {
    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put(FieldName::Provider, self.video.provider.as_str())
            .put_opt(FieldName::VideoId, self.video.video_id.as_str())
            .put(FieldName::VideoType, self.video.video_type.as_str())
            .put_opt(FieldName::Duration, self.video.duration_text().unwrap_or_default())
            .put_opt(FieldName::Thumbnail, self.video.thumbnail.as_str())
            .put_opt(FieldName::Technologies, join_list(&self.technologies));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] provider, [11] video id,
/// [12] video type, [13] duration (seconds), [14] thumbnail, [15] technologies`.
impl RowRecord for VideoArticle {
    const KIND: &'static str = "video";
    const COLUMNS: usize = CORE_COLUMNS + 6;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        let provider_name = row.text(10);
        let provider = VideoProvider::from_name(&provider_name).unwrap_or_else(|| {
            if !provider_name.is_empty() {
                tracing::warn!(provider = %provider_name, "Unknown video provider in row, using default");
            }
            VideoProvider::default()
        });
        let type_name = row.text(12);
        let video_type = VideoType::from_name(&type_name).unwrap_or_else(|| {
            if !type_name.is_empty() {
                tracing::warn!(video_type = %type_name, "Unknown video type in row, using default");
            }
            VideoType::default()
        });
        let duration = row.optional_int(13, "duration")?;
        if duration.is_some_and(|secs| secs < 0) {
            return Err(ContentError::InvalidNumber {
                field: "duration",
                value: row.text(13),
            });
        }
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            video: VideoDetails {
                provider,
                video_id: row.text(11),
                video_type,
                duration,
                thumbnail: row.text(14),
            },
            technologies: row.list(15),
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.video.provider.as_str().to_string(),
            self.video.video_id.clone(),
            self.video.video_type.as_str().to_string(),
            optional_int_cell(self.video.duration),
            self.video.thumbnail.clone(),
            join_list(&self.technologies),
        ]);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{from_json, ContentStatus};

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_roundup_from_row_reads_every_column() {
        let row = cells(&[
            "7", "u-1", "2", "ACME", "1", "DEPLOYED", "2024-01-02 03:04:05",
            "Weekly roundup", "Links of the week", "https://acme.example/r/7",
            "editor", "@acme", "rust, go",
        ]);
        let roundup = RoundupArticle::from_row(&row).unwrap();
        assert_eq!(roundup.core.id, 7);
        assert_eq!(roundup.core.uuid(), "u-1");
        assert_eq!(roundup.core.site_id, 2);
        assert!(roundup.core.published);
        assert_eq!(roundup.status(), ContentStatus::Deployed);
        assert_eq!(roundup.title(), "Weekly roundup");
        assert_eq!(roundup.tracked_by, "editor");
        assert_eq!(roundup.technologies, vec!["rust", "go"]);
        assert_eq!(roundup.guid(), "RUP-ACME-00007");
        assert_eq!(roundup.to_row(), cells(&[
            "7", "u-1", "2", "ACME", "1", "DEPLOYED", "2024-01-02 03:04:05",
            "Weekly roundup", "Links of the week", "https://acme.example/r/7",
            "editor", "@acme", "rust,go",
        ]));
    }

    #[test]
    fn test_video_row_rejects_bad_duration() {
        let mut row = cells(&["1", "", "1", "ACME", "0", "NEW", "", "Demo", "", "", "VIMEO", "42", "DEMO", "ten", "", ""]);
        assert!(VideoArticle::from_row(&row).is_err());
        row[13] = "-5".into();
        let err = VideoArticle::from_row(&row).unwrap_err();
        assert!(matches!(err, ContentError::InvalidNumber { field: "duration", .. }));
        row[13] = "600".into();
        let video = VideoArticle::from_row(&row).unwrap();
        assert_eq!(video.video.provider, VideoProvider::Vimeo);
        assert_eq!(video.video.duration, Some(600));
        assert_eq!(video.video.video_type, VideoType::Demo);
    }

    #[test]
    fn test_video_from_url_classifies() {
        let video = VideoArticle::from_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "Customer interview with ACME",
        )
        .unwrap();
        assert_eq!(video.video.video_id, "dQw4w9WgXcQ");
        assert_eq!(video.video.video_type, VideoType::Interview);
        assert!(VideoArticle::from_url("https://acme.example/a.mp4", "x").is_none());
    }

    #[test]
    fn test_post_json_round_trip() {
        let mut post = PostArticle::new();
        post.init();
        post.core.id = 12;
        post.core.org_code = "ACME".into();
        post.core.summary.title = "Release notes 🚀".into();
        post.details.author = "Jo".into();
        post.details.body = "Line one\nLine two".into();
        post.technologies = vec!["kubernetes".into()];

        let value = post.to_json().unwrap();
        assert_eq!(value["author"], "Jo");
        assert_eq!(value["code"], "ACME");
        let back: PostArticle = from_json(&value).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn test_clone_is_equal_but_independent() {
        let mut video = VideoArticle::new();
        video.core.summary.title = "Original".into();
        let mut copy = video.clone();
        assert_eq!(copy, video);
        copy.core.summary.title = "Changed".into();
        assert_eq!(video.title(), "Original");
    }
}
