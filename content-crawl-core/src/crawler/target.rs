use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::extractor::FieldExtractor;
use super::page::{CrawlerWebPage, FieldSet, Section};
use crate::content_type::ContentType;
use crate::error::{ContentError, ContentResult};

fn enabled_by_default() -> bool {
    true
}

/// Where and how to scrape one content type for one organisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerTarget {
    /// Organisation code the scraped content is attributed to.
    pub organisation: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Overrides the config-wide provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Site ids to publish to; empty means every site.
    #[serde(default)]
    pub sites: Vec<i64>,
    #[serde(default)]
    pub pages: Vec<CrawlerWebPage>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl CrawlerTarget {
    pub fn new(organisation: &str, content_type: ContentType) -> Self {
        Self {
            organisation: organisation.to_string(),
            content_type,
            provider: None,
            sites: Vec::new(),
            pages: Vec::new(),
            enabled: true,
        }
    }

    pub fn is_for_site(&self, site_id: i64) -> bool {
        self.sites.is_empty() || self.sites.contains(&site_id)
    }

    /// The first field named `name` in `section` across this target's pages.
    pub fn field(&self, section: Section, name: &str) -> Option<&FieldExtractor> {
        self.pages
            .iter()
            .filter_map(|page| page.section(section))
            .find_map(|set| set.field(name))
    }

    fn validate(&self) -> ContentResult<()> {
        let label = format!("{}/{}", self.organisation, self.content_type);
        if self.organisation.trim().is_empty() {
            return Err(ContentError::InvalidConfig(format!(
                "target {label} has no organisation code"
            )));
        }
        if self.content_type == ContentType::Organisation {
            return Err(ContentError::InvalidConfig(format!(
                "target {label} cannot crawl organisation records"
            )));
        }
        if self.pages.is_empty() {
            return Err(ContentError::InvalidConfig(format!(
                "target {label} declares no pages"
            )));
        }
        for page in &self.pages {
            if !page.has_teasers() && !page.has_articles() {
                return Err(ContentError::InvalidConfig(format!(
                    "page {} of target {label} declares neither teasers nor articles",
                    page.url
                )));
            }
            let sets: [(&str, &Option<FieldSet>); 2] =
                [("teasers", &page.teasers), ("articles", &page.articles)];
            for (name, set) in sets {
                if let Some(set) = set {
                    if set.fields.is_empty() {
                        return Err(ContentError::InvalidConfig(format!(
                            "{name} of page {} in target {label} has no fields",
                            page.url
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Root of a crawler configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Default provider for targets that do not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default)]
    pub targets: Vec<CrawlerTarget>,
}

impl CrawlerConfig {
    /// Parses and validates YAML.
    pub fn from_yaml_str(yaml: &str) -> ContentResult<Self> {
        let config: CrawlerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.trace_loaded();
        Ok(config)
    }

    pub fn trace_loaded(&self) {
        info!(
            provider = self.provider.as_deref().unwrap_or("<none>"),
            targets = self.targets.len(),
            enabled = self.enabled_targets().count(),
            "Loaded crawler config"
        );
        for target in &self.targets {
            debug!(
                organisation = %target.organisation,
                content_type = %target.content_type,
                pages = target.pages.len(),
                enabled = target.enabled,
                "Loaded crawler target"
            );
        }
    }

    /// Checks structural rules that the YAML schema alone cannot express.
    pub fn validate(&self) -> ContentResult<()> {
        let mut seen = BTreeSet::new();
        for target in &self.targets {
            target.validate()?;
            // Lookups ignore case, so keys must too.
            let key = target.organisation.trim().to_ascii_uppercase();
            if !seen.insert((key, target.content_type)) {
                return Err(ContentError::InvalidConfig(format!(
                    "duplicate target {}/{}",
                    target.organisation, target.content_type
                )));
            }
        }
        Ok(())
    }

    /// The target's own provider, else the config default.
    pub fn provider_for<'a>(&'a self, target: &'a CrawlerTarget) -> Option<&'a str> {
        target.provider.as_deref().or(self.provider.as_deref())
    }

    pub fn enabled_targets(&self) -> impl Iterator<Item = &CrawlerTarget> {
        self.targets.iter().filter(|t| t.enabled)
    }

    pub fn targets_for<'a>(&'a self, org_code: &'a str) -> impl Iterator<Item = &'a CrawlerTarget> {
        self.targets
            .iter()
            .filter(move |t| t.organisation.eq_ignore_ascii_case(org_code))
    }

    pub fn find(&self, org_code: &str, content_type: ContentType) -> Option<&CrawlerTarget> {
        self.targets.iter().find(|t| {
            t.content_type == content_type && t.organisation.eq_ignore_ascii_case(org_code)
        })
    }

    /// Limits every target to `sites`. Targets without sites take the whole
    /// list; targets left with no site in common are disabled.
    pub fn restrict_sites(&mut self, sites: &[i64]) {
        for target in &mut self.targets {
            if target.sites.is_empty() {
                target.sites = sites.to_vec();
                continue;
            }
            target.sites.retain(|s| sites.contains(s));
            if target.sites.is_empty() && target.enabled {
                warn!(
                    organisation = %target.organisation,
                    content_type = %target.content_type,
                    "Target has no allowed sites, disabling"
                );
                target.enabled = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
provider: static
targets:
  - organisation: ACME
    type: post
    sites: [1, 2]
    pages:
      - url: https://acme.example/blog
        teasers:
          selector: div.post
          fields:
            title: { selector: h2 }
        articles:
          fields:
            body: { selector: div.content }
  - organisation: ACME
    type: video
    provider: browser
    enabled: false
    pages:
      - url: https://acme.example/videos
        teasers:
          fields:
            url: { selector: a, attribute: href }
"#;

    #[test]
    fn test_lookup_helpers() {
        let config = CrawlerConfig::from_yaml_str(CONFIG).unwrap();
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.enabled_targets().count(), 1);

        let post = config.find("acme", ContentType::Post).unwrap();
        assert_eq!(config.provider_for(post), Some("static"));
        assert!(post.is_for_site(2));
        assert!(!post.is_for_site(3));
        assert!(post.field(Section::Articles, "body").is_some());
        assert!(post.field(Section::Teasers, "body").is_none());

        let video = config.find("ACME", ContentType::Video).unwrap();
        assert_eq!(config.provider_for(video), Some("browser"));
        assert!(video.is_for_site(99));
    }

    #[test]
    fn test_restrict_sites() {
        let mut config = CrawlerConfig::from_yaml_str(CONFIG).unwrap();
        config.restrict_sites(&[3]);
        let post = config.find("ACME", ContentType::Post).unwrap();
        assert!(!post.enabled);
        let video = config.find("ACME", ContentType::Video).unwrap();
        assert_eq!(video.sites, vec![3]);
    }

    #[test]
    fn test_validation_rules() {
        let cases = [
            ("targets:\n  - organisation: A\n    type: post\n", "no pages"),
            (
                "targets:\n  - organisation: A\n    type: post\n    pages:\n      - url: u\n",
                "neither teasers nor articles",
            ),
            (
                "targets:\n  - organisation: A\n    type: post\n    pages:\n      - url: u\n        teasers:\n          fields: {}\n",
                "has no fields",
            ),
            (
                "targets:\n  - organisation: A\n    type: organisation\n    pages:\n      - url: u\n        teasers:\n          fields:\n            t: {}\n",
                "organisation records",
            ),
        ];
        for (yaml, expected) in cases {
            let err = CrawlerConfig::from_yaml_str(yaml).unwrap_err();
            assert!(err.to_string().contains(expected), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let target = "  - organisation: A\n    type: job\n    pages:\n      - url: u\n        teasers:\n          fields:\n            t: {}\n";
        let yaml = format!("targets:\n{target}{target}");
        let err = CrawlerConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate target A/job"));
    }

    #[test]
    fn test_duplicate_targets_differing_in_case_rejected() {
        let target = |org: &str| {
            format!("  - organisation: {org}\n    type: job\n    pages:\n      - url: u\n        teasers:\n          fields:\n            t: {{}}\n")
        };
        let yaml = format!("targets:\n{}{}", target("ACME"), target("acme"));
        let err = CrawlerConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate target acme/job"), "{err}");
    }

    #[test]
    fn test_unknown_type_is_a_parse_error() {
        let err = CrawlerConfig::from_yaml_str("targets:\n  - organisation: A\n    type: gizmo\n").unwrap_err();
        assert!(matches!(err, ContentError::Yaml(_)));
    }
}
