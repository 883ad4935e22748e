//! Per-organisation, per-content-type aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::ContentStatus;
use crate::content_type::ContentType;
use crate::item::ContentItem;
use crate::lenient;

/// What an organisation page shows for one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSummary {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default, deserialize_with = "lenient::int")]
    pub count: i64,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub deployed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::date")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ContentTypeSummary {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            count: 0,
            deployed: false,
            last_updated: None,
        }
    }
}

/// Counters for one (site, organisation, content type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSettings {
    pub site_id: i64,
    pub org_code: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub enabled: bool,
    pub count: i64,
    pub staged: i64,
    pub deployed: i64,
    pub archived: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ContentSettings {
    pub fn new(site_id: i64, org_code: &str, content_type: ContentType) -> Self {
        Self {
            site_id,
            org_code: org_code.to_string(),
            content_type,
            enabled: true,
            count: 0,
            staged: 0,
            deployed: 0,
            archived: 0,
            last_updated: None,
        }
    }

    /// Adds one item's status and date to the counters.
    pub fn record(&mut self, status: ContentStatus, published: Option<&DateTime<Utc>>) {
        self.count += 1;
        match status {
            ContentStatus::Staged => self.staged += 1,
            ContentStatus::Deployed => self.deployed += 1,
            ContentStatus::Archived => self.archived += 1,
            ContentStatus::New | ContentStatus::Pending | ContentStatus::Skipped => {}
        }
        if let Some(date) = published {
            if self.last_updated.map_or(true, |last| *date > last) {
                self.last_updated = Some(*date);
            }
        }
    }

    /// Counts the items belonging to this site, organisation and type.
    /// Items with site id `0` are shared across sites.
    pub fn tally(site_id: i64, org_code: &str, content_type: ContentType, items: &[ContentItem]) -> Self {
        let mut settings = Self::new(site_id, org_code, content_type);
        for item in items.iter().filter(|i| i.content_type() == content_type) {
            let content = item.content();
            let core = content.core();
            if !core.org_code.eq_ignore_ascii_case(org_code) {
                continue;
            }
            if core.site_id != site_id && core.site_id != 0 {
                continue;
            }
            settings.record(core.status, content.published_date());
        }
        debug!(
            site_id,
            org_code,
            content_type = %content_type,
            count = settings.count,
            deployed = settings.deployed,
            "Tallied content settings"
        );
        settings
    }

    pub fn summary(&self) -> ContentTypeSummary {
        ContentTypeSummary {
            content_type: self.content_type,
            count: self.count,
            deployed: self.deployed > 0,
            last_updated: self.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::PostArticle;
    use crate::resource::JobResource;
    use chrono::TimeZone;

    fn post(org: &str, site: i64, status: ContentStatus, day: u32) -> ContentItem {
        let mut post = PostArticle::new();
        post.core.org_code = org.into();
        post.core.site_id = site;
        post.core.status = status;
        post.core.summary.published_date = Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap());
        post.into()
    }

    #[test]
    fn test_tally_filters_and_counts() {
        let items = vec![
            post("ACME", 1, ContentStatus::Deployed, 3),
            post("ACME", 1, ContentStatus::Staged, 9),
            post("acme", 0, ContentStatus::New, 5),
            post("ACME", 2, ContentStatus::Deployed, 20),
            post("OTHER", 1, ContentStatus::Deployed, 21),
            JobResource::new().into(),
        ];
        let settings = ContentSettings::tally(1, "ACME", ContentType::Post, &items);
        assert_eq!(settings.count, 3);
        assert_eq!(settings.deployed, 1);
        assert_eq!(settings.staged, 1);
        assert_eq!(
            settings.last_updated,
            Some(Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap())
        );

        let summary = settings.summary();
        assert_eq!(summary.count, 3);
        assert!(summary.deployed);
    }

    #[test]
    fn test_empty_tally_is_not_deployed() {
        let settings = ContentSettings::tally(1, "ACME", ContentType::Event, &[]);
        assert_eq!(settings.summary(), ContentTypeSummary::new(ContentType::Event));
    }
}
