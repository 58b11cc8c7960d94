//! Selector Matching
//!
//! The simple selector forms the host supports: tag, `.class`, `#id`,
//! `[attr]`, `tag[attr]` and `*`.

use crate::element::ElementNode;

/// Parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Class(String),
    Id(String),
    Attr(String),
    TagAttr(String, String),
}

impl SimpleSelector {
    /// Parse a selector string; `None` for empty or unsupported input.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if s == "*" {
            return Some(Self::Universal);
        }
        if let Some(id) = s.strip_prefix('#') {
            return Some(Self::Id(id.to_string()));
        }
        if let Some(class) = s.strip_prefix('.') {
            return Some(Self::Class(class.to_string()));
        }
        if let Some(open) = s.find('[') {
            let attr = s[open + 1..].strip_suffix(']')?;
            if attr.is_empty() {
                return None;
            }
            if open == 0 {
                return Some(Self::Attr(attr.to_string()));
            }
            return Some(Self::TagAttr(s[..open].to_ascii_lowercase(), attr.to_string()));
        }
        Some(Self::Tag(s.to_ascii_lowercase()))
    }

    /// Whether `node` matches this selector.
    pub fn matches(&self, node: &ElementNode) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => node.tag == *tag,
            Self::Class(class) => node.has_class(class),
            Self::Id(id) => node.attr("id") == Some(id.as_str()),
            Self::Attr(attr) => node.attr(attr).is_some(),
            Self::TagAttr(tag, attr) => node.tag == *tag && node.attr(attr).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal));
        assert_eq!(
            SimpleSelector::parse("IMG"),
            Some(SimpleSelector::Tag("img".to_string()))
        );
        assert_eq!(
            SimpleSelector::parse(".lazy"),
            Some(SimpleSelector::Class("lazy".to_string()))
        );
        assert_eq!(
            SimpleSelector::parse("#hero"),
            Some(SimpleSelector::Id("hero".to_string()))
        );
        assert_eq!(
            SimpleSelector::parse("[lazy-src]"),
            Some(SimpleSelector::Attr("lazy-src".to_string()))
        );
        assert_eq!(
            SimpleSelector::parse("img[lazy-src]"),
            Some(SimpleSelector::TagAttr(
                "img".to_string(),
                "lazy-src".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert_eq!(SimpleSelector::parse(""), None);
        assert_eq!(SimpleSelector::parse("   "), None);
        assert_eq!(SimpleSelector::parse("img[lazy-src"), None);
        assert_eq!(SimpleSelector::parse("img[]"), None);
    }

    #[test]
    fn test_matching() {
        let mut node = ElementNode::new("img");
        node.attrs.insert("lazy-src".to_string(), "a.png".to_string());
        node.classes.push("lazy".to_string());

        assert!(SimpleSelector::parse("img").unwrap().matches(&node));
        assert!(SimpleSelector::parse(".lazy").unwrap().matches(&node));
        assert!(SimpleSelector::parse("[lazy-src]").unwrap().matches(&node));
        assert!(SimpleSelector::parse("img[lazy-src]").unwrap().matches(&node));
        assert!(!SimpleSelector::parse("div[lazy-src]").unwrap().matches(&node));
        assert!(!SimpleSelector::parse("#hero").unwrap().matches(&node));
    }
}
