//! Pattern search over an [`OffsetIndex`] and projection of matches back
//! onto tree nodes.

pub mod session;

use markdown_caret_config::SearchConfig;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::index::{FlatMode, OffsetIndex};
use crate::text::{CharMap, char_len};
use crate::tree::NodeId;

pub use session::{Highlight, SearchSession};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub use_regex: bool,
    pub case_sensitive: bool,
    /// Plain-text queries shorter than this never match
    pub min_plain_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            use_regex: false,
            case_sensitive: false,
            min_plain_len: 2,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            use_regex: config.use_regex,
            case_sensitive: config.case_sensitive,
            min_plain_len: config.min_plain_len,
        }
    }
}

/// A match in the flat text of the index it was found in.
///
/// Only meaningful for that index's mode; rerun the search after a mode
/// switch instead of carrying matches across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub doc_start: usize,
    pub doc_end: usize,
}

/// Part of a match that falls inside one node's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSegment {
    pub node_id: NodeId,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// All non-overlapping matches of `query`, ordered by `doc_start`.
///
/// Regex queries run over the whole flat text and skip zero-length hits.
/// Plain queries shorter than `min_plain_len` find nothing; in writing mode
/// they are confined to single entries so a hit never straddles two blocks.
/// An invalid pattern yields no matches.
pub fn find_matches(index: &OffsetIndex, query: &str, options: &SearchOptions) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }

    if options.use_regex {
        return match compile(query, options.case_sensitive) {
            Some(re) => scan(&re, index.text(), 0),
            None => Vec::new(),
        };
    }

    if char_len(query) < options.min_plain_len {
        return Vec::new();
    }
    let Some(re) = compile(&regex::escape(query), options.case_sensitive) else {
        return Vec::new();
    };
    match index.mode() {
        FlatMode::Writing => index
            .entries()
            .iter()
            .flat_map(|entry| scan(&re, &entry.text, entry.doc_start))
            .collect(),
        FlatMode::Source => scan(&re, index.text(), 0),
    }
}

fn compile(pattern: &str, case_sensitive: bool) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|err| log::debug!("ignoring invalid search pattern {pattern:?}: {err}"))
        .ok()
}

fn scan(re: &Regex, text: &str, base: usize) -> Vec<SearchMatch> {
    let chars = CharMap::new(text);
    re.find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| SearchMatch {
            doc_start: base + chars.char_at(m.start()),
            doc_end: base + chars.char_at(m.end()),
        })
        .collect()
}

/// Index of the first match at or after `doc_offset`, wrapping to the first
/// match when the offset is past all of them.
pub fn closest_match(matches: &[SearchMatch], doc_offset: usize) -> Option<usize> {
    if matches.is_empty() {
        return None;
    }
    matches
        .iter()
        .position(|m| m.doc_start >= doc_offset)
        .or(Some(0))
}

/// Split a match into per-node ranges local to each overlapped entry.
pub fn segments_for_match(index: &OffsetIndex, m: &SearchMatch) -> Vec<MatchSegment> {
    let entries = index.entries();
    let first = entries.partition_point(|entry| entry.doc_end <= m.doc_start);
    entries[first..]
        .iter()
        .take_while(|entry| entry.doc_start < m.doc_end)
        .filter(|entry| entry.doc_end > m.doc_start && !entry.is_empty())
        .map(|entry| MatchSegment {
            node_id: entry.node_id.clone(),
            start_offset: m.doc_start.max(entry.doc_start) - entry.doc_start,
            end_offset: m.doc_end.min(entry.doc_end) - entry.doc_start,
        })
        .collect()
}
