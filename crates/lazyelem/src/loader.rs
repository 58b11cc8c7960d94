//! Detector and Loader
//!
//! Watches pending elements and performs their kind-specific load action
//! once they come within a buffered distance of the viewport.

use std::time::Instant;

use crate::ElementId;
use crate::config::{Config, ConfigUpdate};
use crate::debounce::Debounce;
use crate::dom::Dom;
use crate::kind::{LoadKind, WindowEvent};
use crate::minify::min_markup;
use crate::registry::{BatchCallback, LoadCallback, Registry, WatchEntry};

/// Namespace under which the loader binds its window handlers.
pub const EVENT_NAMESPACE: &str = "lazyelem";

const WINDOW_EVENTS: [WindowEvent; 2] = [WindowEvent::Scroll, WindowEvent::Resize];

/// What a registration call should watch.
pub enum Target<'a> {
    /// All elements carrying the configured source attribute.
    Default,
    /// Elements matching a selector.
    Selector(&'a str),
    /// A concrete element collection.
    Elements(Vec<ElementId>),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(selector: &'a str) -> Self {
        Target::Selector(selector)
    }
}

impl From<Vec<ElementId>> for Target<'_> {
    fn from(elements: Vec<ElementId>) -> Self {
        Target::Elements(elements)
    }
}

impl From<ElementId> for Target<'_> {
    fn from(element: ElementId) -> Self {
        Target::Elements(vec![element])
    }
}

/// Counters kept across detection passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectStats {
    /// Detection passes run.
    pub passes: u64,
    /// Entries whose load action dispatched.
    pub dispatched: u64,
    /// Entries left pending by the visibility gate.
    pub skipped_hidden: u64,
    /// Entries left pending by the proximity gate.
    pub skipped_out_of_range: u64,
}

/// A viewport-driven lazy loader.
///
/// One instance owns its registry, configuration, debounce state and
/// listening flag; independent loaders can coexist on the same page.
/// The host drives it through three entry points: registration calls,
/// [`notify`](Lazyelem::notify) for window events and
/// [`poll`](Lazyelem::poll) for the debounce deadline.
pub struct Lazyelem {
    config: Config,
    registry: Registry,
    debounce: Debounce,
    listening: bool,
    stats: DetectStats,
}

impl Default for Lazyelem {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Lazyelem {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: Registry::new(),
            debounce: Debounce::new(),
            listening: false,
            stats: DetectStats::default(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge a partial configuration update. Takes effect on subsequent
    /// passes; entries already dispatched are not revisited.
    pub fn configure(&mut self, update: ConfigUpdate) {
        self.config.apply(update);
    }

    /// Number of pending entries.
    pub fn pending(&self) -> usize {
        self.registry.len()
    }

    /// Whether the window subscription is currently active.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn stats(&self) -> DetectStats {
        self.stats
    }

    /// Register elements for kind-specific lazy loading.
    ///
    /// Runs one immediate detection pass, so elements already inside the
    /// trigger window load synchronously from inside this call.
    pub fn listen<'a, D: Dom>(&mut self, dom: &mut D, target: impl Into<Target<'a>>, kind: LoadKind) {
        assert_ne!(kind, LoadKind::Batch, "batch registration goes through listen_batch");
        self.register(dom, target.into(), kind, None, None);
    }

    /// Register elements and invoke `callback` with each one as it loads.
    pub fn listen_with<'a, D: Dom>(
        &mut self,
        dom: &mut D,
        target: impl Into<Target<'a>>,
        kind: LoadKind,
        callback: LoadCallback,
    ) {
        assert_ne!(kind, LoadKind::Batch, "batch registration goes through listen_batch");
        self.register(dom, target.into(), kind, Some(callback), None);
    }

    /// Register elements whose targets are reported to `callback` as one
    /// ordered list per flush. Registrations sharing a callback share
    /// one batch group.
    pub fn listen_batch<'a, D: Dom>(
        &mut self,
        dom: &mut D,
        target: impl Into<Target<'a>>,
        callback: BatchCallback,
    ) {
        let group = self.registry.batch_group_for(&callback);
        self.register(dom, target.into(), LoadKind::Batch, None, Some(group));
    }

    fn register<D: Dom>(
        &mut self,
        dom: &mut D,
        target: Target<'_>,
        kind: LoadKind,
        callback: Option<LoadCallback>,
        batch_group: Option<usize>,
    ) {
        let elements = self.resolve(dom, target);
        tracing::debug!("listen: {} element(s) registered as {:?}", elements.len(), kind);

        for el in elements {
            if kind.wants_loading_class() {
                dom.add_class(el, &self.config.loading_class);
            }
            self.registry.push(WatchEntry {
                kind,
                target: el,
                callback: callback.clone(),
                batch_group,
            });
        }

        self.sync_listening(dom);
        self.detect(dom);
    }

    fn resolve<D: Dom>(&self, dom: &D, target: Target<'_>) -> Vec<ElementId> {
        match target {
            Target::Default => dom.select_with_attribute(&self.config.src_attribute),
            Target::Selector(selector) => dom.select(selector),
            Target::Elements(elements) => elements,
        }
    }

    /// Feed a window event into the debouncer. Ignored while nothing is
    /// pending. Scroll and resize share one timer.
    pub fn notify(&mut self, event: WindowEvent, now: Instant) {
        if self.registry.is_empty() {
            return;
        }
        match event {
            WindowEvent::Scroll | WindowEvent::Resize => {
                self.debounce.arm(now, self.config.timeout);
            }
        }
    }

    /// Run the scheduled detection pass if its deadline has elapsed.
    /// Returns whether a pass ran.
    pub fn poll<D: Dom>(&mut self, dom: &mut D, now: Instant) -> bool {
        if !self.debounce.fire(now) {
            return false;
        }
        self.detect(dom);
        true
    }

    /// Test every pending entry in registration order and load the ones
    /// inside the trigger window.
    pub fn detect<D: Dom>(&mut self, dom: &mut D) {
        self.stats.passes += 1;

        let mut index = 0;
        while index < self.registry.len() {
            if !self.entry_ready(dom, index) {
                index += 1;
                continue;
            }

            // Single-shot: the entry leaves the registry before its
            // action and callback run. The cursor stays put so the entry
            // shifted into this slot is seen next.
            let entry = self.registry.remove(index);
            self.dispatch(dom, &entry);
            if let Some(callback) = &entry.callback {
                callback(entry.target);
            }
            self.stats.dispatched += 1;
        }

        self.flush_batches();
        self.sync_listening(dom);
    }

    /// Both gates for the entry at `index`: visible, and inside the
    /// buffered viewport.
    fn entry_ready<D: Dom>(&mut self, dom: &D, index: usize) -> bool {
        let target = self.registry.entries()[index].target;

        let (width, height) = dom.box_size(target);
        let hidden = dom.is_display_none(target)
            || !dom.is_attached(target)
            || (width == 0.0 && height == 0.0);
        if hidden {
            self.stats.skipped_hidden += 1;
            return false;
        }

        if !self.in_trigger_window(dom, target) {
            self.stats.skipped_out_of_range += 1;
            return false;
        }
        true
    }

    /// Trigger window test: the viewport inflated by the buffer on both
    /// the leading and trailing edge.
    fn in_trigger_window<D: Dom>(&self, dom: &D, target: ElementId) -> bool {
        let viewport_height = dom.viewport_height();
        let scroll_top = dom.scroll_top();
        let buffer = self.config.buffer;
        let (_, height) = dom.box_size(target);
        let top = dom.offset_top(target);

        top + height > scroll_top - buffer && top < scroll_top + viewport_height + buffer
    }

    fn dispatch<D: Dom>(&mut self, dom: &mut D, entry: &WatchEntry) {
        tracing::trace!("dispatch {:?} for {:?}", entry.kind, entry.target);

        match entry.kind {
            LoadKind::Image => {
                if let Some(src) = dom.attribute(entry.target, &self.config.src_attribute) {
                    dom.set_attribute(entry.target, "src", &src);
                    dom.remove_attribute(entry.target, &self.config.src_attribute);
                }
                dom.remove_class(entry.target, &self.config.loading_class);
            }
            LoadKind::Background => {
                if let Some(bg) = dom.attribute(entry.target, &self.config.background_attribute) {
                    dom.set_style(entry.target, "background-image", &format!("url({bg})"));
                    dom.remove_attribute(entry.target, &self.config.background_attribute);
                }
            }
            LoadKind::Dom => {
                if let Some(block) = dom.template_block(entry.target) {
                    let markup = min_markup(&dom.text(block));
                    dom.replace_with_markup(block, &markup);
                }
            }
            LoadKind::Function => {}
            LoadKind::Batch => {
                if let Some(group) = entry.batch_group {
                    self.registry.collect_into(group, entry.target);
                }
            }
        }
    }

    /// One callback invocation per group with a non-empty collected
    /// list; the list is cleared, the group persists.
    fn flush_batches(&mut self) {
        for group in self.registry.groups_mut() {
            if group.collected.is_empty() {
                continue;
            }
            let targets = std::mem::take(&mut group.collected);
            tracing::debug!("batch flush: {} target(s)", targets.len());
            (group.callback)(&targets);
        }
    }

    /// The window subscription is active iff the registry is non-empty.
    fn sync_listening<D: Dom>(&mut self, dom: &mut D) {
        let want = !self.registry.is_empty();
        if want == self.listening {
            return;
        }
        if want {
            dom.bind_window(EVENT_NAMESPACE, &WINDOW_EVENTS);
            tracing::debug!("window listeners bound");
        } else {
            dom.unbind_window(EVENT_NAMESPACE);
            self.debounce.cancel();
            tracing::debug!("window listeners unbound");
        }
        self.listening = want;
    }

    /// Drop every pending entry watching `el`. Other entries and all
    /// batch groups are untouched.
    pub fn clear_element<D: Dom>(&mut self, dom: &mut D, el: ElementId) {
        let removed = self.registry.remove_target(el);
        if removed > 0 {
            tracing::debug!("cleared {} pending entries for {:?}", removed, el);
        }
        self.sync_listening(dom);
    }

    /// Reset the registry and every batch group, e.g. between
    /// single-page-app view transitions.
    pub fn clear_all<D: Dom>(&mut self, dom: &mut D) {
        self.registry.clear();
        self.sync_listening(dom);
        tracing::debug!("loader cleared");
    }
}
