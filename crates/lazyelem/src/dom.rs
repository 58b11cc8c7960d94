//! Host Page Collaborator
//!
//! The loader does not own a document. Everything it needs from the
//! embedding page goes through this trait: selector queries, geometry
//! reads, attribute/class/style mutation and namespaced window bindings.

use crate::{ElementId, WindowEvent};

/// Capabilities the loader requires from the embedding page.
///
/// Geometry is expressed in document coordinates: [`offset_top`] is the
/// distance of an element's top edge from the document top,
/// [`scroll_top`] the window's vertical scroll offset and
/// [`viewport_height`] the visible window height.
///
/// [`offset_top`]: Dom::offset_top
/// [`scroll_top`]: Dom::scroll_top
/// [`viewport_height`]: Dom::viewport_height
pub trait Dom {
    /// All elements matching a selector, in document order.
    fn select(&self, selector: &str) -> Vec<ElementId>;

    /// All elements carrying the given attribute, in document order.
    fn select_with_attribute(&self, name: &str) -> Vec<ElementId>;

    /// Whether the element is attached to its document.
    fn is_attached(&self, el: ElementId) -> bool;

    /// Whether the computed display is `none` (on the element itself or
    /// any ancestor).
    fn is_display_none(&self, el: ElementId) -> bool;

    /// Rendered box size as `(width, height)`.
    fn box_size(&self, el: ElementId) -> (f64, f64);

    /// Offset of the element's top edge from the document top.
    fn offset_top(&self, el: ElementId) -> f64;

    /// Height of the visible window area.
    fn viewport_height(&self) -> f64;

    /// Current vertical scroll offset of the window.
    fn scroll_top(&self) -> f64;

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, el: ElementId, name: &str);

    fn add_class(&mut self, el: ElementId, class: &str);

    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Set an inline style property.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    /// Nested template block (a `script` child) of the element, if any.
    fn template_block(&self, el: ElementId) -> Option<ElementId>;

    /// Text content of an element.
    fn text(&self, el: ElementId) -> String;

    /// Replace a template block with markup, activated in place.
    fn replace_with_markup(&mut self, block: ElementId, markup: &str);

    /// Subscribe a namespaced handler to window events.
    fn bind_window(&mut self, namespace: &str, events: &[WindowEvent]);

    /// Remove every handler bound under `namespace`.
    fn unbind_window(&mut self, namespace: &str);
}
