//! Regex-based field extraction applied to scraped text.

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};

/// Whether an extractor keeps the first match or every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    #[default]
    First,
    All,
}

const DEFAULT_SEPARATOR: &str = " ";

/// How one named field is pulled out of a scraped element.
///
/// `selector`/`attribute` locate the element for the crawler; `validator`,
/// `expr`, `format` and `match` shape the text once it has been scraped.
/// Expressions are compiled with `.` matching newlines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFieldExtractor", into = "RawFieldExtractor")]
pub struct FieldExtractor {
    pub selector: Option<String>,
    pub attribute: Option<String>,
    validator: Option<Regex>,
    expr: Option<Regex>,
    format: Option<String>,
    /// `format` rewritten into `regex` expansion syntax.
    template: Option<String>,
    match_type: MatchType,
    separator: Option<String>,
}

/// YAML shape of a [`FieldExtractor`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFieldExtractor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validator: Option<String>,
    #[serde(default, alias = "pattern", skip_serializing_if = "Option::is_none")]
    expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, rename = "match")]
    match_type: MatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    separator: Option<String>,
}

fn compile(expr: &str) -> ContentResult<Regex> {
    RegexBuilder::new(expr)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| ContentError::pattern(expr, &e))
}

/// Rewrites a `$1`-style replacement into `regex` expansion syntax.
///
/// Group numbers are braced so that `$1px` is group 1 followed by `px`,
/// `\$` is a literal dollar and `\x` is a literal `x`. `${name}` passes
/// through. A `$` not followed by a digit or `{` is kept literally.
fn expansion_template(format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 4);
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => out.push_str("$$"),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            '$' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(d) = chars.next_if(char::is_ascii_digit) {
                        out.push(d);
                    }
                    out.push('}');
                }
                Some('{') => {
                    out.push('$');
                    for n in chars.by_ref() {
                        out.push(n);
                        if n == '}' {
                            break;
                        }
                    }
                }
                _ => out.push_str("$$"),
            },
            other => out.push(other),
        }
    }
    out
}

impl TryFrom<RawFieldExtractor> for FieldExtractor {
    type Error = ContentError;

    fn try_from(raw: RawFieldExtractor) -> Result<Self, Self::Error> {
        Ok(Self {
            selector: raw.selector,
            attribute: raw.attribute,
            validator: raw.validator.as_deref().map(compile).transpose()?,
            expr: raw.expr.as_deref().map(compile).transpose()?,
            template: raw.format.as_deref().map(expansion_template),
            format: raw.format,
            match_type: raw.match_type,
            separator: raw.separator,
        })
    }
}

impl From<FieldExtractor> for RawFieldExtractor {
    fn from(e: FieldExtractor) -> Self {
        Self {
            selector: e.selector,
            attribute: e.attribute,
            validator: e.validator.map(|r| r.as_str().to_string()),
            expr: e.expr.map(|r| r.as_str().to_string()),
            format: e.format,
            match_type: e.match_type,
            separator: e.separator,
        }
    }
}

impl FieldExtractor {
    /// A pass-through extractor: no validation, no expression.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selector = Some(selector.to_string());
        self
    }

    pub fn with_expr(mut self, expr: &str) -> ContentResult<Self> {
        self.expr = Some(compile(expr)?);
        Ok(self)
    }

    pub fn with_validator(mut self, validator: &str) -> ContentResult<Self> {
        self.validator = Some(compile(validator)?);
        Ok(self)
    }

    /// Replacement template; `$1`, `${1}` and `${name}` refer to groups and
    /// `\$` is a literal dollar.
    pub fn with_format(mut self, format: &str) -> Self {
        self.template = Some(expansion_template(format));
        self.format = Some(format.to_string());
        self
    }

    pub fn with_match(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = Some(separator.to_string());
        self
    }

    pub fn has_expr(&self) -> bool {
        self.expr.is_some()
    }

    pub fn expr(&self) -> Option<&str> {
        self.expr.as_ref().map(Regex::as_str)
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// True when no validator is set or the validator matches.
    pub fn is_valid(&self, input: &str) -> bool {
        self.validator
            .as_ref()
            .map_or(true, |validator| validator.is_match(input))
    }

    /// Extracts a value from `input`.
    ///
    /// Returns `None` when the validator rejects the input or the expression
    /// does not match. Without an expression the input passes through as is.
    pub fn extract(&self, input: &str) -> Option<String> {
        if !self.is_valid(input) {
            tracing::trace!(input_len = input.len(), "Validator rejected input");
            return None;
        }
        let Some(expr) = &self.expr else {
            return Some(input.to_string());
        };
        match self.match_type {
            MatchType::First => expr.captures(input).map(|caps| self.render(&caps)),
            MatchType::All => {
                let all = self.extract_all(input);
                if all.is_empty() {
                    None
                } else {
                    Some(all.join(self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)))
                }
            }
        }
    }

    /// Every match, each rendered through the format.
    pub fn extract_all(&self, input: &str) -> Vec<String> {
        if !self.is_valid(input) {
            return Vec::new();
        }
        match &self.expr {
            Some(expr) => expr
                .captures_iter(input)
                .map(|caps| self.render(&caps))
                .collect(),
            None => vec![input.to_string()],
        }
    }

    fn render(&self, caps: &Captures<'_>) -> String {
        match &self.template {
            Some(template) => {
                let mut out = String::new();
                caps.expand(template, &mut out);
                out
            }
            None => caps[0].to_string(),
        }
    }
}
