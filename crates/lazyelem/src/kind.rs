//! Load Kinds and Window Events

/// What loading an entry means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadKind {
    /// Deferred `src` attribute on an image element.
    #[default]
    Image,

    /// Deferred `background-image` style.
    Background,

    /// Inline templated markup, activated in place.
    Dom,

    /// No built-in action; the entry exists to trigger its callback.
    Function,

    /// Target is collected into a batch group and reported once per flush.
    Batch,
}

impl LoadKind {
    /// Whether registration decorates the element with the loading class.
    #[inline]
    pub fn wants_loading_class(&self) -> bool {
        matches!(self, LoadKind::Image)
    }
}

/// Window-level events the loader listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEvent {
    Scroll,
    Resize,
}
