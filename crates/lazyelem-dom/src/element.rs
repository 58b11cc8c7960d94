//! Page Elements
//!
//! Element data stored in the page arena.

use std::collections::BTreeMap;

use lazyelem::ElementId;

/// CSS display values the host distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    Inline,
    None,
}

/// A single element in the page arena.
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Tag name, lowercase.
    pub tag: String,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) classes: Vec<String>,
    pub(crate) style: BTreeMap<String, String>,
    /// Raw text content (the template source for script blocks).
    pub(crate) text: String,
    /// Markup activated in place of a removed template block.
    pub(crate) markup: Option<String>,
    pub(crate) display: Display,
    /// Offset of the top edge from the document top.
    pub(crate) top: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl ElementNode {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            text: String::new(),
            markup: None,
            display: Display::default(),
            top: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Attribute value, if set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Inline style property, if set.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Markup this element received from an activated template block.
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}
