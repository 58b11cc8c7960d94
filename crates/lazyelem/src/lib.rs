//! lazyelem - Lazy loader for markup elements
//!
//! Defers loading of images, background images, inline templated markup
//! and arbitrary callback work until the target element scrolls within a
//! buffered distance of the viewport.
//!
//! The loader does not own a page. It drives one through the [`Dom`]
//! collaborator trait: select elements, read geometry, mutate attributes
//! and styles, bind namespaced window listeners. The host delivers
//! scroll/resize events and pumps the debounce timer, so the whole thing
//! runs on one logical thread with no clock of its own.
//!
//! # Example
//! ```rust,ignore
//! use lazyelem::{Lazyelem, LoadKind, Target, WindowEvent};
//!
//! let mut loader = Lazyelem::default();
//! loader.listen(&mut page, Target::Default, LoadKind::Image);
//!
//! // host event loop:
//! loader.notify(WindowEvent::Scroll, now);
//! loader.poll(&mut page, now);
//! ```

mod config;
mod debounce;
mod dom;
mod kind;
mod loader;
mod minify;
mod registry;

pub use config::{Config, ConfigError, ConfigUpdate};
pub use debounce::Debounce;
pub use dom::Dom;
pub use kind::{LoadKind, WindowEvent};
pub use loader::{DetectStats, EVENT_NAMESPACE, Lazyelem, Target};
pub use minify::min_markup;
pub use registry::{BatchCallback, LoadCallback};

/// Element identifier (host-assigned index into the page's arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
