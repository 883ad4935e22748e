//! Organisations: the companies content is attributed to.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::content::UNASSIGNED_ID;
use crate::content_type::ContentType;
use crate::error::{ContentError, ContentResult};
use crate::lenient;
use crate::row::{Row, RowRecord};
use crate::settings::ContentTypeSummary;

/// Social media handles. Each is optional; empty means not set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialHandles {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub twitter: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub facebook: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub youtube: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Organisation {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::int")]
    pub site_id: i64,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub website: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub logo: String,
    #[serde(flatten)]
    pub social: SocialHandles,
    /// Bit `ContentType::index()` set means that type's tab is shown.
    #[serde(rename = "tabs", deserialize_with = "lenient::or_default")]
    pub tabs_enabled: u32,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "lenient::or_default")]
    pub summaries: BTreeMap<ContentType, ContentTypeSummary>,
}

impl Default for Organisation {
    fn default() -> Self {
        Self {
            id: UNASSIGNED_ID,
            code: String::new(),
            name: String::new(),
            site_id: 0,
            website: String::new(),
            summary: String::new(),
            logo: String::new(),
            social: SocialHandles::default(),
            tabs_enabled: 0,
            summaries: BTreeMap::new(),
        }
    }
}

impl Organisation {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn has_website(&self) -> bool {
        !self.website.is_empty()
    }

    pub fn has_logo(&self) -> bool {
        !self.logo.is_empty()
    }

    pub fn is_tab_enabled(&self, content_type: ContentType) -> bool {
        self.tabs_enabled & (1 << content_type.index()) != 0
    }

    pub fn set_tab_enabled(&mut self, content_type: ContentType, enabled: bool) {
        let bit = 1 << content_type.index();
        if enabled {
            self.tabs_enabled |= bit;
        } else {
            self.tabs_enabled &= !bit;
        }
    }

    pub fn enabled_tabs(&self) -> Vec<ContentType> {
        ContentType::ALL
            .into_iter()
            .filter(|t| self.is_tab_enabled(*t))
            .collect()
    }

    pub fn summary(&self, content_type: ContentType) -> Option<&ContentTypeSummary> {
        self.summaries.get(&content_type)
    }

    /// Replaces the summary for the summary's own content type.
    pub fn set_summary(&mut self, summary: ContentTypeSummary) {
        self.summaries.insert(summary.content_type, summary);
    }

    pub fn total_count(&self) -> i64 {
        self.summaries.values().map(|s| s.count).sum()
    }

    pub fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: &Value) -> ContentResult<Self> {
        crate::content::from_json(value)
    }
}

/// Columns: `[0] id, [1] code, [2] name, [3] site id, [4] website, [5] logo,
/// [6] twitter, [7] linkedin, [8] facebook, [9] youtube, [10] github, [11] tabs`.
impl RowRecord for Organisation {
    const KIND: &'static str = "organisation";
    const COLUMNS: usize = 12;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            id: row.id(0)?,
            code: row.text(1),
            name: row.text(2),
            site_id: row.int(3, "siteId")?,
            website: row.text(4),
            logo: row.text(5),
            social: SocialHandles {
                twitter: row.text(6),
                linkedin: row.text(7),
                facebook: row.text(8),
                youtube: row.text(9),
                github: row.text(10),
            },
            tabs_enabled: u32::try_from(row.int(11, "tabs")?).map_err(|_| {
                ContentError::InvalidNumber {
                    field: "tabs",
                    value: row.text(11),
                }
            })?,
            ..Self::default()
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.code.clone(),
            self.name.clone(),
            self.site_id.to_string(),
            self.website.clone(),
            self.logo.clone(),
            self.social.twitter.clone(),
            self.social.linkedin.clone(),
            self.social.facebook.clone(),
            self.social.youtube.clone(),
            self.social.github.clone(),
            self.tabs_enabled.to_string(),
        ]
    }
}

/// List view of an organisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationListing {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub logo: String,
    pub counts: BTreeMap<ContentType, i64>,
    pub total: i64,
}

impl From<&Organisation> for OrganisationListing {
    fn from(org: &Organisation) -> Self {
        Self {
            code: org.code.clone(),
            name: org.name.clone(),
            logo: org.logo.clone(),
            counts: org
                .summaries
                .iter()
                .map(|(t, s)| (*t, s.count))
                .collect(),
            total: org.total_count(),
        }
    }
}
