//! Video providers, video classification and the video detail view.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoProvider {
    #[default]
    Youtube,
    Vimeo,
    Wistia,
}

#[allow(clippy::expect_used)]
static PROVIDER_PATTERNS: LazyLock<Vec<(VideoProvider, Regex)>> = LazyLock::new(|| {
    vec![
        (
            VideoProvider::Youtube,
            Regex::new(r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})")
                .expect("YouTube regex is valid"),
        ),
        (
            VideoProvider::Vimeo,
            Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("Vimeo regex is valid"),
        ),
        (
            VideoProvider::Wistia,
            Regex::new(r"(?:wistia\.(?:com|net)/(?:medias|embed/iframe)/|wvideo=)([A-Za-z0-9]+)")
                .expect("Wistia regex is valid"),
        ),
    ]
});

impl VideoProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoProvider::Youtube => "YOUTUBE",
            VideoProvider::Vimeo => "VIMEO",
            VideoProvider::Wistia => "WISTIA",
        }
    }

    /// Detects the provider of a video URL and extracts its id.
    pub fn from_url(url: &str) -> Option<(VideoProvider, String)> {
        PROVIDER_PATTERNS.iter().find_map(|(provider, pattern)| {
            pattern
                .captures(url)
                .and_then(|caps| caps.get(1))
                .map(|id| (*provider, id.as_str().to_string()))
        })
    }

    pub fn from_name(name: &str) -> Option<VideoProvider> {
        match name.trim().to_ascii_uppercase().as_str() {
            "YOUTUBE" => Some(VideoProvider::Youtube),
            "VIMEO" => Some(VideoProvider::Vimeo),
            "WISTIA" => Some(VideoProvider::Wistia),
            _ => None,
        }
    }

    pub fn embed_url(self, video_id: &str) -> String {
        match self {
            VideoProvider::Youtube => format!("https://www.youtube.com/embed/{video_id}"),
            VideoProvider::Vimeo => format!("https://player.vimeo.com/video/{video_id}"),
            VideoProvider::Wistia => format!("https://fast.wistia.net/embed/iframe/{video_id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoType {
    Webinar,
    Demo,
    Tutorial,
    Interview,
    Presentation,
    Podcast,
    #[default]
    Other,
}

/// Keyword table scanned in order by [`VideoType::from_text`].
const VIDEO_TYPE_KEYWORDS: &[(&str, VideoType)] = &[
    ("webinar", VideoType::Webinar),
    ("demo", VideoType::Demo),
    ("walkthrough", VideoType::Demo),
    ("tutorial", VideoType::Tutorial),
    ("how to", VideoType::Tutorial),
    ("interview", VideoType::Interview),
    ("keynote", VideoType::Presentation),
    ("talk", VideoType::Presentation),
    ("presentation", VideoType::Presentation),
    ("podcast", VideoType::Podcast),
    ("episode", VideoType::Podcast),
];

impl VideoType {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoType::Webinar => "WEBINAR",
            VideoType::Demo => "DEMO",
            VideoType::Tutorial => "TUTORIAL",
            VideoType::Interview => "INTERVIEW",
            VideoType::Presentation => "PRESENTATION",
            VideoType::Podcast => "PODCAST",
            VideoType::Other => "OTHER",
        }
    }

    /// Classifies a title or description; the first keyword found wins.
    pub fn from_text(text: &str) -> VideoType {
        let text = text.to_lowercase();
        VIDEO_TYPE_KEYWORDS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, video_type)| *video_type)
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<VideoType> {
        let name = name.trim().to_ascii_uppercase();
        [
            VideoType::Webinar,
            VideoType::Demo,
            VideoType::Tutorial,
            VideoType::Interview,
            VideoType::Presentation,
            VideoType::Podcast,
            VideoType::Other,
        ]
        .into_iter()
        .find(|t| t.as_str() == name)
    }
}

/// Provider-specific detail of a video article.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(deserialize_with = "lenient::or_default")]
    pub provider: VideoProvider,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub video_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub video_type: VideoType,
    /// Length in seconds.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_int")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub thumbnail: String,
}

impl VideoDetails {
    pub fn has_video_id(&self) -> bool {
        !self.video_id.is_empty()
    }

    pub fn embed_url(&self) -> Option<String> {
        self.has_video_id()
            .then(|| self.provider.embed_url(&self.video_id))
    }

    /// Duration as `m:ss` or `h:mm:ss`.
    pub fn duration_text(&self) -> Option<String> {
        self.duration.map(|secs| {
            let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
            if h > 0 {
                format!("{h}:{m:02}:{s:02}")
            } else {
                format!("{m}:{s:02}")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_detection_extracts_ids() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", VideoProvider::Youtube, "dQw4w9WgXcQ"),
            ("https://youtu.be/dQw4w9WgXcQ?t=3", VideoProvider::Youtube, "dQw4w9WgXcQ"),
            ("https://vimeo.com/76979871", VideoProvider::Vimeo, "76979871"),
            ("https://acme.wistia.com/medias/abc123xyz", VideoProvider::Wistia, "abc123xyz"),
        ];
        for (url, provider, id) in cases {
            assert_eq!(
                VideoProvider::from_url(url),
                Some((provider, id.to_string())),
                "url {url}"
            );
        }
        assert_eq!(VideoProvider::from_url("https://example.com/video.mp4"), None);
    }

    #[test]
    fn test_video_type_first_keyword_wins() {
        assert_eq!(VideoType::from_text("Live Webinar: product demo"), VideoType::Webinar);
        assert_eq!(VideoType::from_text("How to deploy in 5 minutes"), VideoType::Tutorial);
        assert_eq!(VideoType::from_text("Quarterly update"), VideoType::Other);
    }

    #[test]
    fn test_duration_text() {
        let mut details = VideoDetails::default();
        assert_eq!(details.duration_text(), None);
        details.duration = Some(95);
        assert_eq!(details.duration_text().as_deref(), Some("1:35"));
        details.duration = Some(3725);
        assert_eq!(details.duration_text().as_deref(), Some("1:02:05"));
    }

    #[test]
    fn test_embed_url_requires_id() {
        let mut details = VideoDetails::default();
        assert_eq!(details.embed_url(), None);
        details.provider = VideoProvider::Vimeo;
        details.video_id = "123".into();
        assert_eq!(
            details.embed_url().as_deref(),
            Some("https://player.vimeo.com/video/123")
        );
    }
}
