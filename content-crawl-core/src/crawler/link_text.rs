//! Anchor texts that mark a teaser's link to its detail page.

use crate::content_type::ContentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkText {
    ReadMore,
    LearnMore,
    ContinueReading,
    Watch,
    Register,
    Apply,
    View,
    Download,
}

const LINK_KEYWORDS: &[(&str, LinkText)] = &[
    ("read more", LinkText::ReadMore),
    ("read article", LinkText::ReadMore),
    ("read the article", LinkText::ReadMore),
    ("learn more", LinkText::LearnMore),
    ("find out more", LinkText::LearnMore),
    ("continue reading", LinkText::ContinueReading),
    ("watch", LinkText::Watch),
    ("watch now", LinkText::Watch),
    ("watch video", LinkText::Watch),
    ("register", LinkText::Register),
    ("register now", LinkText::Register),
    ("apply", LinkText::Apply),
    ("apply now", LinkText::Apply),
    ("view", LinkText::View),
    ("view details", LinkText::View),
    ("download", LinkText::Download),
    ("download now", LinkText::Download),
];

impl LinkText {
    /// Matches an anchor's text against the keyword table, ignoring case,
    /// surrounding whitespace and trailing arrows or ellipses.
    pub fn from_text(text: &str) -> Option<LinkText> {
        let normalised = text
            .trim()
            .trim_end_matches(['>', '»', '→', '.', '…', ' '])
            .to_lowercase();
        LINK_KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == normalised)
            .map(|(_, link)| *link)
    }

    /// Link kinds expected on teasers of `content_type`, most likely first.
    pub fn for_type(content_type: ContentType) -> &'static [LinkText] {
        match content_type {
            ContentType::Post | ContentType::Roundup => &[
                LinkText::ReadMore,
                LinkText::ContinueReading,
                LinkText::LearnMore,
            ],
            ContentType::Video => &[LinkText::Watch, LinkText::View, LinkText::LearnMore],
            ContentType::Event => &[LinkText::Register, LinkText::LearnMore, LinkText::View],
            ContentType::Job => &[LinkText::Apply, LinkText::View, LinkText::LearnMore],
            ContentType::WhitePaper | ContentType::Ebook | ContentType::Publication => &[
                LinkText::Download,
                LinkText::ReadMore,
                LinkText::LearnMore,
            ],
            ContentType::Project | ContentType::Tool => {
                &[LinkText::LearnMore, LinkText::View, LinkText::ReadMore]
            }
            ContentType::Organisation => &[],
        }
    }

    /// Every keyword that identifies a detail link for `content_type`.
    pub fn keywords(content_type: ContentType) -> Vec<&'static str> {
        let kinds = Self::for_type(content_type);
        LINK_KEYWORDS
            .iter()
            .filter(|(_, link)| kinds.contains(link))
            .map(|(keyword, _)| *keyword)
            .collect()
    }

    pub fn is_link_for(text: &str, content_type: ContentType) -> bool {
        Self::from_text(text)
            .map(|link| Self::for_type(content_type).contains(&link))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_normalises() {
        assert_eq!(LinkText::from_text("  Read More »"), Some(LinkText::ReadMore));
        assert_eq!(LinkText::from_text("Continue reading..."), Some(LinkText::ContinueReading));
        assert_eq!(LinkText::from_text("Apply now →"), Some(LinkText::Apply));
        assert_eq!(LinkText::from_text("Subscribe"), None);
    }

    #[test]
    fn test_links_are_scoped_by_type() {
        assert!(LinkText::is_link_for("Register now", ContentType::Event));
        assert!(!LinkText::is_link_for("Register now", ContentType::Job));
        assert!(LinkText::keywords(ContentType::Job).contains(&"apply now"));
        assert!(LinkText::keywords(ContentType::Organisation).is_empty());
    }
}
