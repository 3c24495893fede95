use serde::Serialize;

use super::{MatchSegment, SearchMatch, SearchOptions, closest_match, find_matches, segments_for_match};
use crate::index::OffsetIndex;
use crate::serialize::Serializer;
use crate::translate::TreeCursor;
use crate::tree::SyntaxTree;

/// A highlighted range handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub segment: MatchSegment,
    pub is_current: bool,
}

/// State of an open search bar: the query, its matches and the selection.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: String,
    options: SearchOptions,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
    open: bool,
}

impl SearchSession {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// Run `query` and select the first match at or after the caret.
    ///
    /// The caret is projected through `index` so it lands in the same flat
    /// text the matches are reported in.
    pub fn open<S: Serializer + ?Sized>(
        &mut self,
        index: &OffsetIndex,
        tree: &SyntaxTree,
        serializer: &S,
        query: &str,
        caret: Option<&TreeCursor>,
    ) -> Option<SearchMatch> {
        let caret_offset = caret
            .map(|c| index.project(tree, serializer, c))
            .unwrap_or(0);
        self.query = query.to_string();
        self.matches = find_matches(index, query, &self.options);
        self.current = closest_match(&self.matches, caret_offset);
        self.open = true;
        self.current()
    }

    /// Re-run the query against a rebuilt index, keeping the selection on
    /// the match nearest the previously selected one.
    pub fn refresh(&mut self, index: &OffsetIndex) -> Option<SearchMatch> {
        if !self.open {
            return None;
        }
        let anchor = self.current().map(|m| m.doc_start).unwrap_or(0);
        self.matches = find_matches(index, &self.query, &self.options);
        self.current = closest_match(&self.matches, anchor);
        self.current()
    }

    pub fn next(&mut self) -> Option<SearchMatch> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<SearchMatch> {
        self.step(self.matches.len().saturating_sub(1))
    }

    fn step(&mut self, by: usize) -> Option<SearchMatch> {
        let count = self.matches.len();
        if count == 0 {
            return None;
        }
        let next = self.current.map(|i| (i + by) % count).unwrap_or(0);
        self.current = Some(next);
        self.current()
    }

    pub fn current(&self) -> Option<SearchMatch> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    /// 1-based position of the selection and the match count, for "3 of 7".
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.matches.len()))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Per-node highlight ranges, with the selected match flagged.
    pub fn highlights(&self, index: &OffsetIndex) -> Vec<Highlight> {
        self.matches
            .iter()
            .enumerate()
            .flat_map(|(i, m)| {
                let is_current = self.current == Some(i);
                segments_for_match(index, m)
                    .into_iter()
                    .map(move |segment| Highlight {
                        segment,
                        is_current,
                    })
            })
            .collect()
    }

    /// Drop all match state. Focus goes back to the document surface, which
    /// the host handles.
    pub fn close(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = None;
        self.open = false;
    }
}
