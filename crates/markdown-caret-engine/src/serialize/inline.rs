//! Inline markup stripping for writing-mode text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());
static IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*)\*|\b_([^_\s][^_]*)_\b").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

/// First participating capture group of an alternation.
fn either(caps: &Captures<'_>) -> String {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Reduce inline markdown to the text a reader sees.
///
/// Links and wiki links keep their label (the alias for `[[target|alias]]`),
/// images keep their alt text, and emphasis, strong, strikethrough and code
/// markers are dropped.
pub fn strip_inline(text: &str) -> String {
    let out = CODE_SPAN.replace_all(text, "$1");
    let out = IMAGE.replace_all(&out, "$1");
    let out = WIKI_LINK.replace_all(&out, |caps: &Captures<'_>| {
        caps.get(2)
            .or_else(|| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    });
    let out = LINK.replace_all(&out, "$1");
    let out = STRONG.replace_all(&out, either);
    let out = STRIKE.replace_all(&out, "$1");
    let out = EMPHASIS.replace_all(&out, either);
    out.into_owned()
}

/// Visible text of a raw HTML fragment: tags removed, entities decoded.
pub fn strip_html(html: &str) -> String {
    let without_tags = HTML_TAG.replace_all(html, "");
    html_escape::decode_html_entities(without_tags.trim()).into_owned()
}
