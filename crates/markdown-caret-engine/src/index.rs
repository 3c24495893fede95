//! Span index from tree nodes to ranges of one flat serialization.
//!
//! The flat text is rebuilt from the entries themselves (entry text plus
//! separator-filled gaps) rather than asked of the serializer a second time,
//! so a drift between the indexing rule and the serializer shows up as an
//! [`IndexMismatch`] instead of silently shifted highlights.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::serialize::{BLOCK_SEPARATOR, SEPARATOR_LEN, Serializer};
use crate::text::char_len;
use crate::translate::{TreeCursor, to_absolute};
use crate::tree::{NodeId, NodeIndex, NodeKind, SyntaxTree};

/// Which flat form of the document an index describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatMode {
    /// Literal markdown, prefixes and tags included
    Source,
    /// Formatting-stripped text as shown in the WYSIWYG surface
    Writing,
}

impl fmt::Display for FlatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatMode::Source => f.write_str("source"),
            FlatMode::Writing => f.write_str("writing"),
        }
    }
}

/// One node's contribution to the flat text, `[doc_start, doc_end)` in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMapEntry {
    pub node_id: NodeId,
    pub doc_start: usize,
    pub doc_end: usize,
    pub text: String,
}

impl OffsetMapEntry {
    pub fn len(&self) -> usize {
        self.doc_end - self.doc_start
    }

    pub fn is_empty(&self) -> bool {
        self.doc_start == self.doc_end
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{mode} index diverges from serializer at char {position} (index len {index_len}, serializer len {expected_len})")]
pub struct IndexMismatch {
    pub mode: FlatMode,
    pub position: usize,
    pub index_len: usize,
    pub expected_len: usize,
}

/// Flat text of one mode plus the node spans that produced it.
///
/// Built fresh from a tree snapshot; it is never patched in place.
#[derive(Debug, Clone)]
pub struct OffsetIndex {
    mode: FlatMode,
    text: String,
    text_len: usize,
    entries: Vec<OffsetMapEntry>,
    by_node: HashMap<NodeId, usize>,
}

impl OffsetIndex {
    pub fn build<S: Serializer + ?Sized>(tree: &SyntaxTree, serializer: &S, mode: FlatMode) -> Self {
        let mut entries = Vec::new();
        let mut pos = 0;
        collect(tree, serializer, mode, tree.roots(), &mut entries, &mut pos);

        let text = reconstruct(&entries);
        let by_node = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.node_id.clone(), i))
            .collect();
        let index = Self {
            mode,
            text_len: pos,
            text,
            entries,
            by_node,
        };

        log::debug!(
            "built {} offset index: {} entries, {} chars",
            mode,
            index.entries.len(),
            index.text_len
        );
        debug_assert_eq!(index.verify(tree, serializer), Ok(()));
        index
    }

    pub fn mode(&self) -> FlatMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the flat text in characters.
    pub fn len(&self) -> usize {
        self.text_len
    }

    pub fn is_empty(&self) -> bool {
        self.text_len == 0
    }

    pub fn entries(&self) -> &[OffsetMapEntry] {
        &self.entries
    }

    pub fn entry_for(&self, node_id: &NodeId) -> Option<&OffsetMapEntry> {
        self.by_node.get(node_id).map(|&i| &self.entries[i])
    }

    /// Flat-text offset of a node-local offset, clamped to the entry.
    pub fn doc_offset(&self, node_id: &NodeId, local: usize) -> Option<usize> {
        self.entry_for(node_id)
            .map(|entry| entry.doc_start + local.min(entry.len()))
    }

    /// Project a tree cursor into this index's flat text.
    ///
    /// Source mode goes through the translator, so the cursor lands exactly
    /// even inside a container. In writing mode the content offset is first
    /// carried into bare text, so inline markup before the caret is not
    /// counted; nodes without an entry of their own resolve to the start of
    /// the next retained entry (blocks skipped as empty). Unknown nodes
    /// resolve to 0.
    pub fn project<S: Serializer + ?Sized>(
        &self,
        tree: &SyntaxTree,
        serializer: &S,
        cursor: &TreeCursor,
    ) -> usize {
        if self.mode == FlatMode::Source {
            return to_absolute(tree, serializer, cursor)
                .or_else(|| self.entry_for(&cursor.node_id).map(|entry| entry.doc_start))
                .unwrap_or(0);
        }
        let Some(idx) = tree.index_of(&cursor.node_id) else {
            return 0;
        };
        let node = tree.node(idx);
        let local = serializer.bare_prefix_len(&node.kind, &node.content, cursor.offset);
        self.doc_offset(&cursor.node_id, local)
            .unwrap_or_else(|| self.next_entry_start(tree, idx))
    }

    fn next_entry_start(&self, tree: &SyntaxTree, idx: NodeIndex) -> usize {
        let order = tree.descendants();
        let at = order.iter().position(|&i| i == idx).unwrap_or(order.len());
        order[at..]
            .iter()
            .find_map(|&i| self.entry_for(&tree.node(i).id))
            .map(|entry| entry.doc_start)
            .unwrap_or(self.text_len)
    }

    /// Entry owning a flat-text offset and the offset local to it.
    ///
    /// Offsets inside a separator gap belong to the following entry at local
    /// offset 0; offsets past the end belong to the last entry.
    pub fn locate(&self, offset: usize) -> Option<(&OffsetMapEntry, usize)> {
        let i = self.entries.partition_point(|entry| entry.doc_end < offset);
        let entry = self.entries.get(i).or_else(|| self.entries.last())?;
        let local = offset.saturating_sub(entry.doc_start).min(entry.len());
        Some((entry, local))
    }

    /// Compare the reconstructed text with the serializer's own output.
    pub fn verify<S: Serializer + ?Sized>(
        &self,
        tree: &SyntaxTree,
        serializer: &S,
    ) -> Result<(), IndexMismatch> {
        let expected = match self.mode {
            FlatMode::Source => serializer.document_markdown(tree),
            FlatMode::Writing => serializer.document_bare_text(tree),
        };
        if expected == self.text {
            return Ok(());
        }
        let position = expected
            .chars()
            .zip(self.text.chars())
            .take_while(|(a, b)| a == b)
            .count();
        Err(IndexMismatch {
            mode: self.mode,
            position,
            index_len: self.text_len,
            expected_len: char_len(&expected),
        })
    }
}

fn collect<S: Serializer + ?Sized>(
    tree: &SyntaxTree,
    serializer: &S,
    mode: FlatMode,
    nodes: &[NodeIndex],
    entries: &mut Vec<OffsetMapEntry>,
    pos: &mut usize,
) {
    for &idx in nodes {
        let node = tree.node(idx);
        match (mode, &node.kind) {
            (FlatMode::Source, _) => {
                let text = serializer.to_markdown(tree, idx);
                push_entry(entries, pos, &node.id, text);
            }
            (FlatMode::Writing, NodeKind::HtmlBlockContainer(_)) => {
                collect(tree, serializer, mode, &node.children, entries, pos);
            }
            (FlatMode::Writing, NodeKind::HtmlBlockCollapsed(_)) => {
                let text = serializer.to_bare_text(tree, idx);
                let child = tree.node(node.children[0]);
                if !text.is_empty() {
                    push_entry(entries, pos, &child.id, text);
                }
            }
            (FlatMode::Writing, _) => {
                let text = serializer.to_bare_text(tree, idx);
                if !text.is_empty() {
                    push_entry(entries, pos, &node.id, text);
                }
            }
        }
    }
}

fn push_entry(entries: &mut Vec<OffsetMapEntry>, pos: &mut usize, id: &NodeId, text: String) {
    if !entries.is_empty() {
        *pos += SEPARATOR_LEN;
    }
    let doc_start = *pos;
    *pos += char_len(&text);
    entries.push(OffsetMapEntry {
        node_id: id.clone(),
        doc_start,
        doc_end: *pos,
        text,
    });
}

/// Rebuild flat text from entries, filling each gap with the separator
/// clipped to the gap size.
pub fn reconstruct(entries: &[OffsetMapEntry]) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for entry in entries {
        let gap = entry.doc_start.saturating_sub(cursor);
        out.extend(BLOCK_SEPARATOR.chars().take(gap));
        out.push_str(&entry.text);
        cursor = entry.doc_end;
    }
    out
}

/// Readable dump of an index, one entry per line.
pub fn format_index(index: &OffsetIndex) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    writeln!(out, "mode: {} ({} chars)", index.mode, index.text_len).unwrap();
    for entry in &index.entries {
        writeln!(
            out,
            "[{}..{}] {} {:?}",
            entry.doc_start, entry.doc_end, entry.node_id, entry.text
        )
        .unwrap();
    }
    out
}
