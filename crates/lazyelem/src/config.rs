//! Loader Configuration

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

/// Runtime configuration for a [`Lazyelem`](crate::Lazyelem) instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Debounce delay between a window event and the detection pass.
    pub timeout: Duration,

    /// Pixel slack added above and below the viewport when testing
    /// load eligibility.
    pub buffer: f64,

    /// Class applied to pending image entries.
    pub loading_class: String,

    /// Attribute holding the deferred image source.
    pub src_attribute: String,

    /// Attribute holding the deferred background image.
    pub background_attribute: String,

    /// Unrecognized update keys, retained but unused.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10),
            buffer: 100.0,
            loading_class: "lazy-loading".to_string(),
            src_attribute: "lazy-src".to_string(),
            background_attribute: "lazy-bg".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Overlay an update: `Some` fields overwrite, `None` fields keep
    /// the current value.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(ms) = update.timeout {
            self.timeout = Duration::from_millis(ms);
        }
        if let Some(px) = update.buffer {
            self.buffer = px;
        }
        if let Some(class) = update.loading_class {
            self.loading_class = class;
        }
        if let Some(attr) = update.src_attribute {
            self.src_attribute = attr;
        }
        if let Some(attr) = update.bg_attribute {
            self.background_attribute = attr;
        }
        self.extra.extend(update.extra);
    }
}

/// Partial configuration overlay.
///
/// Field names mirror the historical wire form: camelCase keys, with the
/// `srcValue`/`bgValue` spellings accepted alongside the attribute names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    /// Debounce delay in milliseconds.
    pub timeout: Option<u64>,

    /// Viewport slack in pixels.
    pub buffer: Option<f64>,

    pub loading_class: Option<String>,

    #[serde(alias = "srcValue")]
    pub src_attribute: Option<String>,

    #[serde(alias = "bgValue", alias = "backgroundAttribute")]
    pub bg_attribute: Option<String>,

    /// Keys this version does not recognize; carried along untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ConfigUpdate {
    /// Parse an update from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration parse error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
