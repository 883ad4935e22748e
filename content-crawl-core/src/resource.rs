//! Resource content types: jobs, events, tools, projects and publications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::content::{Content, ContentCore, CORE_COLUMNS};
use crate::content_type::ContentType;
use crate::error::{ContentError, ContentResult};
use crate::fields::{FieldMap, FieldName};
use crate::lenient;
use crate::row::{flag_cell, join_list, Row, RowRecord};
use crate::time::format_row;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobResource {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub remote: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::list")]
    pub technologies: Vec<String>,
}

impl JobResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }
}

impl Content for JobResource {
    fn content_type(&self) -> ContentType {
        ContentType::Job
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::Location, self.location.as_str())
            .put(FieldName::Remote, self.remote.to_string())
            .put_opt(FieldName::Technologies, join_list(&self.technologies));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] location, [11] remote, [12] technologies`.
impl RowRecord for JobResource {
    const KIND: &'static str = "job";
    const COLUMNS: usize = CORE_COLUMNS + 3;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            location: row.text(10),
            remote: row.flag(11),
            technologies: row.list(12),
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.location.clone(),
            flag_cell(self.remote),
            join_list(&self.technologies),
        ]);
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventResource {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::date")]
    pub end_date: Option<DateTime<Utc>>,
}

impl EventResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the event has not finished. Events without dates never are.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end_date
            .or(self.start_date)
            .map(|last_day| last_day >= now)
            .unwrap_or(false)
    }
}

impl Content for EventResource {
    fn content_type(&self) -> ContentType {
        ContentType::Event
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::Location, self.location.as_str())
            .put_opt(FieldName::StartDate, format_row(self.start_date.as_ref()))
            .put_opt(FieldName::EndDate, format_row(self.end_date.as_ref()));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] location, [11] start date, [12] end date`.
impl RowRecord for EventResource {
    const KIND: &'static str = "event";
    const COLUMNS: usize = CORE_COLUMNS + 3;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            location: row.text(10),
            start_date: row.date(11, "startDate")?,
            end_date: row.date(12, "endDate")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.location.clone(),
            format_row(self.start_date.as_ref()),
            format_row(self.end_date.as_ref()),
        ]);
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolResource {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub repository: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::list")]
    pub technologies: Vec<String>,
}

impl ToolResource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Content for ToolResource {
    fn content_type(&self) -> ContentType {
        ContentType::Tool
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::Repository, self.repository.as_str())
            .put_opt(FieldName::Technologies, join_list(&self.technologies));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] repository, [11] technologies`.
impl RowRecord for ToolResource {
    const KIND: &'static str = "tool";
    const COLUMNS: usize = CORE_COLUMNS + 2;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            repository: row.text(10),
            technologies: row.list(11),
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([self.repository.clone(), join_list(&self.technologies)]);
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectResource {
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub website: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub repository: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::list")]
    pub technologies: Vec<String>,
}

impl ProjectResource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Content for ProjectResource {
    fn content_type(&self) -> ContentType {
        ContentType::Project
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::Website, self.website.as_str())
            .put_opt(FieldName::Repository, self.repository.as_str())
            .put_opt(FieldName::Technologies, join_list(&self.technologies));
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] website, [11] repository, [12] technologies`.
impl RowRecord for ProjectResource {
    const KIND: &'static str = "project";
    const COLUMNS: usize = CORE_COLUMNS + 3;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            website: row.text(10),
            repository: row.text(11),
            technologies: row.list(12),
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.website.clone(),
            self.repository.clone(),
            join_list(&self.technologies),
        ]);
        cells
    }
}

/// White papers, ebooks and other downloadable publications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicationResource {
    #[serde(rename = "type", deserialize_with = "publication_type")]
    content_type: ContentType,
    #[serde(flatten)]
    pub core: ContentCore,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub file_url: String,
}

impl Default for PublicationResource {
    fn default() -> Self {
        Self {
            content_type: ContentType::Publication,
            core: ContentCore::default(),
            author: String::new(),
            file_url: String::new(),
        }
    }
}

fn publication_type<'de, D: Deserializer<'de>>(d: D) -> Result<ContentType, D::Error> {
    let raw = lenient::string(d)?;
    Ok(raw
        .parse::<ContentType>()
        .ok()
        .filter(|t| t.is_publication())
        .unwrap_or(ContentType::Publication))
}

impl PublicationResource {
    /// Fails unless `content_type` is one of the publication kinds.
    pub fn new(content_type: ContentType) -> ContentResult<Self> {
        if !content_type.is_publication() {
            return Err(ContentError::UnknownContentType(format!(
                "{content_type} is not a publication type"
            )));
        }
        Ok(Self {
            content_type,
            ..Self::default()
        })
    }
}

impl Content for PublicationResource {
    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn core(&self) -> &ContentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContentCore {
        &mut self.core
    }

    fn extend_fields(&self, fields: &mut FieldMap) {
        fields
            .put_opt(FieldName::Author, self.author.as_str())
            .put_opt(FieldName::FileUrl, self.file_url.as_str());
    }

    fn to_json(&self) -> ContentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Columns after the shared ten: `[10] type value, [11] author, [12] file url`.
impl RowRecord for PublicationResource {
    const KIND: &'static str = "publication";
    const COLUMNS: usize = CORE_COLUMNS + 3;

    fn from_row(row: &[String]) -> ContentResult<Self> {
        let row = Row::new(Self::KIND, row, Self::COLUMNS)?;
        let content_type: ContentType = row.text(10).parse()?;
        Ok(Self {
            core: ContentCore::from_row(&row)?,
            author: row.text(11),
            file_url: row.text(12),
            ..Self::new(content_type)?
        })
    }

    fn to_row(&self) -> Vec<String> {
        let mut cells = self.core.row_cells();
        cells.extend([
            self.content_type.value().to_string(),
            self.author.clone(),
            self.file_url.clone(),
        ]);
        cells
    }
}
