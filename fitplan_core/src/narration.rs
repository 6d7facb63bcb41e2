//! Speech text for reading a day card aloud.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
static RE_MARKDOWN_SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#>*`_|\[\]()]").unwrap());
static RE_SPACED_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-\s").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_DOT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());

/// Turn a day's markdown into plain sentences prefixed by its title.
///
/// Returns the bare title when there is no content.
pub fn day_speech_text(title: &str, markdown: &str) -> String {
    if markdown.is_empty() {
        return title.to_string();
    }

    let text = RE_NEWLINES.replace_all(markdown, ". ");
    let text = RE_MARKDOWN_SYMBOLS.replace_all(&text, " ");
    let text = RE_SPACED_DASH.replace_all(&text, ". ");
    let text = RE_WHITESPACE.replace_all(&text, " ");
    let text = RE_DOT_RUN.replace_all(&text, ".");

    format!("{}. {}", title.trim_end_matches('.'), text.trim())
}
