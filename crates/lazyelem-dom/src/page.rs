//! In-memory Page
//!
//! Element arena plus the window state the loader observes. Implements
//! the [`lazyelem::Dom`] collaborator.

use std::collections::HashMap;

use lazyelem::{Dom, ElementId, WindowEvent};

use crate::element::{Display, ElementNode};
use crate::selector::SimpleSelector;

/// In-memory page: element arena rooted at a body element, viewport
/// state and namespaced window bindings.
pub struct Page {
    nodes: Vec<ElementNode>,
    viewport_height: f64,
    scroll_top: f64,
    bindings: HashMap<String, Vec<WindowEvent>>,
}

impl Page {
    /// Root body element
    pub const ROOT: ElementId = ElementId(0);

    /// Create a page with a 600px-high viewport at scroll offset 0.
    pub fn new() -> Self {
        Self {
            nodes: vec![ElementNode::new("body")],
            viewport_height: 600.0,
            scroll_top: 0.0,
            bindings: HashMap::new(),
        }
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(ElementNode::new(tag));
        ElementId((self.nodes.len() - 1) as u32)
    }

    /// Append `child` under `parent`, detaching it from any previous
    /// parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Remove an element from its parent.
    pub fn detach(&mut self, el: ElementId) {
        if let Some(parent) = self.node(el).parent {
            self.node_mut(parent).children.retain(|&c| c != el);
            self.node_mut(el).parent = None;
        }
    }

    /// Place an element: document-top offset and rendered size.
    pub fn place(&mut self, el: ElementId, top: f64, width: f64, height: f64) {
        let node = self.node_mut(el);
        node.top = top;
        node.width = width;
        node.height = height;
    }

    pub fn set_display(&mut self, el: ElementId, display: Display) {
        self.node_mut(el).display = display;
    }

    pub fn set_text(&mut self, el: ElementId, text: &str) {
        self.node_mut(el).text = text.to_string();
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Scroll the window to a vertical offset.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_top = offset.max(0.0);
    }

    /// Element data, for inspection.
    pub fn element(&self, el: ElementId) -> &ElementNode {
        self.node(el)
    }

    /// Whether a namespaced window binding is active.
    pub fn bound(&self, namespace: &str) -> bool {
        self.bindings.contains_key(namespace)
    }

    /// Events bound under a namespace, if any.
    pub fn bound_events(&self, namespace: &str) -> Option<&[WindowEvent]> {
        self.bindings.get(namespace).map(Vec::as_slice)
    }

    /// Every attached element in document order (depth first).
    pub fn all_elements(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.walk(Self::ROOT, &mut out);
        out
    }

    fn walk(&self, from: ElementId, out: &mut Vec<ElementId>) {
        for &child in &self.node(from).children {
            out.push(child);
            self.walk(child, out);
        }
    }

    fn node(&self, el: ElementId) -> &ElementNode {
        &self.nodes[el.0 as usize]
    }

    fn node_mut(&mut self, el: ElementId) -> &mut ElementNode {
        &mut self.nodes[el.0 as usize]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for Page {
    fn select(&self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = SimpleSelector::parse(selector) else {
            return Vec::new();
        };
        self.all_elements()
            .into_iter()
            .filter(|&el| selector.matches(self.node(el)))
            .collect()
    }

    fn select_with_attribute(&self, name: &str) -> Vec<ElementId> {
        self.all_elements()
            .into_iter()
            .filter(|&el| self.node(el).attr(name).is_some())
            .collect()
    }

    fn is_attached(&self, el: ElementId) -> bool {
        let mut current = el;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current == Self::ROOT
    }

    fn is_display_none(&self, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            if self.node(id).display == Display::None {
                return true;
            }
            current = self.node(id).parent;
        }
        false
    }

    fn box_size(&self, el: ElementId) -> (f64, f64) {
        if self.is_display_none(el) {
            return (0.0, 0.0);
        }
        let node = self.node(el);
        (node.width, node.height)
    }

    fn offset_top(&self, el: ElementId) -> f64 {
        self.node(el).top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el).attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.node_mut(el).attrs.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, el: ElementId, name: &str) {
        self.node_mut(el).attrs.remove(name);
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        let node = self.node_mut(el);
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.node_mut(el).classes.retain(|c| c != class);
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        self.node_mut(el).style.insert(property.to_string(), value.to_string());
    }

    fn template_block(&self, el: ElementId) -> Option<ElementId> {
        self.node(el)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).tag == "script")
    }

    fn text(&self, el: ElementId) -> String {
        self.node(el).text.clone()
    }

    fn replace_with_markup(&mut self, block: ElementId, markup: &str) {
        let parent = self.node(block).parent;
        self.detach(block);
        if let Some(parent) = parent {
            self.node_mut(parent).markup = Some(markup.to_string());
        }
    }

    fn bind_window(&mut self, namespace: &str, events: &[WindowEvent]) {
        tracing::debug!("bind window handlers: {} {:?}", namespace, events);
        self.bindings.insert(namespace.to_string(), events.to_vec());
    }

    fn unbind_window(&mut self, namespace: &str) {
        tracing::debug!("unbind window handlers: {}", namespace);
        self.bindings.remove(namespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_detach() {
        let mut page = Page::new();
        let div = page.create_element("div");

        assert!(!page.is_attached(div), "fresh elements start detached");

        page.append_child(Page::ROOT, div);
        assert!(page.is_attached(div));

        page.detach(div);
        assert!(!page.is_attached(div));
        assert!(page.element(Page::ROOT).children().is_empty());
    }

    #[test]
    fn test_nested_attachment() {
        let mut page = Page::new();
        let outer = page.create_element("div");
        let inner = page.create_element("span");
        page.append_child(Page::ROOT, outer);
        page.append_child(outer, inner);

        assert!(page.is_attached(inner));

        // detaching the subtree root detaches the descendant
        page.detach(outer);
        assert!(!page.is_attached(inner));
    }

    #[test]
    fn test_display_none_inherited_from_ancestor() {
        let mut page = Page::new();
        let outer = page.create_element("div");
        let inner = page.create_element("img");
        page.append_child(Page::ROOT, outer);
        page.append_child(outer, inner);

        assert!(!page.is_display_none(inner));

        page.set_display(outer, Display::None);
        assert!(page.is_display_none(inner));
        assert_eq!(page.box_size(inner), (0.0, 0.0));
    }

    #[test]
    fn test_select_document_order() {
        let mut page = Page::new();
        let first = page.create_element("img");
        let second = page.create_element("img");
        let other = page.create_element("div");
        page.append_child(Page::ROOT, first);
        page.append_child(Page::ROOT, other);
        page.append_child(other, second);

        assert_eq!(page.select("img"), vec![first, second]);
        assert_eq!(page.select(".missing"), Vec::<ElementId>::new());
    }

    #[test]
    fn test_select_with_attribute_skips_detached() {
        let mut page = Page::new();
        let attached = page.create_element("img");
        let loose = page.create_element("img");
        page.append_child(Page::ROOT, attached);
        page.set_attribute(attached, "lazy-src", "a.png");
        page.set_attribute(loose, "lazy-src", "b.png");

        assert_eq!(page.select_with_attribute("lazy-src"), vec![attached]);
    }

    #[test]
    fn test_template_block_lookup() {
        let mut page = Page::new();
        let holder = page.create_element("div");
        let script = page.create_element("script");
        page.append_child(Page::ROOT, holder);
        page.append_child(holder, script);
        page.set_text(script, "<p>hi</p>");

        assert_eq!(page.template_block(holder), Some(script));

        page.replace_with_markup(script, "<p>hi</p>");
        assert_eq!(page.template_block(holder), None);
        assert_eq!(page.element(holder).markup(), Some("<p>hi</p>"));
    }

    #[test]
    fn test_window_bindings_by_namespace() {
        let mut page = Page::new();
        page.bind_window("lazyelem", &[WindowEvent::Scroll, WindowEvent::Resize]);
        page.bind_window("other", &[WindowEvent::Scroll]);

        assert!(page.bound("lazyelem"));
        assert_eq!(
            page.bound_events("lazyelem"),
            Some(&[WindowEvent::Scroll, WindowEvent::Resize][..])
        );

        page.unbind_window("lazyelem");
        assert!(!page.bound("lazyelem"));
        assert!(page.bound("other"), "unbind is scoped to its namespace");
    }

    #[test]
    fn test_scroll_clamps_to_zero() {
        let mut page = Page::new();
        page.scroll_to(-50.0);
        assert_eq!(page.scroll_top(), 0.0);
    }
}
