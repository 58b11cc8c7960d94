//! Markup Minification
//!
//! Cleanup applied to Dom-kind template text before it is activated:
//! newlines, HTML comments, block comments and space runs in front of a
//! tag are stripped.

use std::sync::LazyLock;

use regex::Regex;

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static HTML_COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!--.*?-->").unwrap());
static BLOCK_COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\*.*?\*/").unwrap());
static SPACE_BEFORE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +<").unwrap());

/// Minify a fragment of markup.
///
/// Already-minified input passes through unchanged, so the transform can
/// be applied any number of times.
pub fn min_markup(markup: &str) -> String {
    let markup = NEWLINES.replace_all(markup, "");
    let markup = HTML_COMMENTS.replace_all(&markup, "");
    let markup = BLOCK_COMMENTS.replace_all(&markup, "");
    SPACE_BEFORE_TAG.replace_all(&markup, "<").into_owned()
}
