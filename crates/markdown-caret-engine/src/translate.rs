//! Position translation between tree cursors and source-mode offsets.
//!
//! Both directions walk the tree depth-first in document order and charge
//! exactly what the [`Serializer`] emits: block separators between siblings,
//! each node's markdown, and for HTML containers the opening tag, the joined
//! children and the closing tag. Keeping the two walks in lockstep is what
//! makes `from_absolute(to_absolute(c)) == c` hold.

use serde::{Deserialize, Serialize};

use crate::serialize::{SEPARATOR_LEN, Serializer};
use crate::text::char_len;
use crate::tree::{NodeId, NodeIndex, NodeKind, SyntaxTree};

/// Which synthetic tag line of an HTML block a cursor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPart {
    Opening,
    Closing,
}

/// A position in the tree.
///
/// `offset` is local to the node content, or local to the tag text when
/// `tag_part` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeCursor {
    pub node_id: NodeId,
    pub offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_part: Option<TagPart>,
}

impl TreeCursor {
    pub fn new(node_id: impl Into<NodeId>, offset: usize) -> Self {
        Self {
            node_id: node_id.into(),
            offset,
            tag_part: None,
        }
    }

    pub fn on_tag(node_id: impl Into<NodeId>, tag_part: TagPart, offset: usize) -> Self {
        Self {
            node_id: node_id.into(),
            offset,
            tag_part: Some(tag_part),
        }
    }
}

/// Absolute source-mode offset of `cursor`.
///
/// Returns `None` when the cursor's node is not in the tree (e.g. deleted
/// since the cursor was captured). Offsets beyond the node's text clamp to
/// its end.
pub fn to_absolute<S: Serializer + ?Sized>(
    tree: &SyntaxTree,
    serializer: &S,
    cursor: &TreeCursor,
) -> Option<usize> {
    let mut pos = 0;
    let found = forward(tree, serializer, tree.roots(), cursor, &mut pos);
    if found.is_none() {
        log::trace!("cursor node {} not found in tree", cursor.node_id);
    }
    found
}

fn forward<S: Serializer + ?Sized>(
    tree: &SyntaxTree,
    serializer: &S,
    siblings: &[NodeIndex],
    cursor: &TreeCursor,
    pos: &mut usize,
) -> Option<usize> {
    for (i, &idx) in siblings.iter().enumerate() {
        if i > 0 {
            *pos += SEPARATOR_LEN;
        }
        let node = tree.node(idx);
        let on_own_tag = node.id == cursor.node_id && cursor.tag_part.is_some();

        match &node.kind {
            NodeKind::HtmlBlockContainer(tag) if !on_own_tag => {
                *pos += char_len(&tag.opening) + SEPARATOR_LEN;
                if let Some(found) = forward(tree, serializer, &node.children, cursor, pos) {
                    return Some(found);
                }
                *pos += SEPARATOR_LEN + char_len(&tag.closing);
            }
            NodeKind::HtmlBlockCollapsed(tag) if !on_own_tag => {
                let child = tree.node(node.children[0]);
                if child.id == cursor.node_id {
                    let offset = cursor.offset.min(char_len(&child.content));
                    return Some(*pos + char_len(&tag.opening) + offset);
                }
                *pos += char_len(&serializer.to_markdown(tree, idx));
            }
            kind if node.id == cursor.node_id => {
                return Some(match cursor.tag_part {
                    Some(TagPart::Closing) => {
                        let line_len = char_len(&node_line(tree, serializer, idx));
                        let closing_len = closing_tag_len(kind);
                        *pos + line_len.saturating_sub(closing_len)
                            + cursor.offset.min(closing_len)
                    }
                    Some(TagPart::Opening) => {
                        let opening_len = opening_tag_len(kind);
                        *pos + serializer.prefix_len(kind) + cursor.offset.min(opening_len)
                    }
                    None => {
                        *pos + serializer.prefix_len(kind)
                            + cursor.offset.min(char_len(&node.content))
                    }
                });
            }
            _ => *pos += char_len(&serializer.to_markdown(tree, idx)),
        }
    }
    None
}

/// Tree cursor owning the absolute source-mode `offset`.
///
/// Offsets inside separators resolve to the start of the following node,
/// offsets past the document resolve to the end of the last top-level node.
/// Returns `None` only for an empty tree.
pub fn from_absolute<S: Serializer + ?Sized>(
    tree: &SyntaxTree,
    serializer: &S,
    offset: usize,
) -> Option<TreeCursor> {
    let mut pos = 0;
    if let Some(cursor) = inverse(tree, serializer, tree.roots(), offset, &mut pos) {
        return Some(cursor);
    }
    tree.last_root().map(|last| end_of(tree, last))
}

fn inverse<S: Serializer + ?Sized>(
    tree: &SyntaxTree,
    serializer: &S,
    siblings: &[NodeIndex],
    offset: usize,
    pos: &mut usize,
) -> Option<TreeCursor> {
    for (i, &idx) in siblings.iter().enumerate() {
        if i > 0 {
            *pos += SEPARATOR_LEN;
        }
        let node = tree.node(idx);
        let node_end = *pos + char_len(&serializer.to_markdown(tree, idx));
        if offset > node_end {
            *pos = node_end;
            continue;
        }

        let cursor = match &node.kind {
            NodeKind::HtmlBlockContainer(tag) => {
                let opening_len = char_len(&tag.opening);
                let children_start = *pos + opening_len + SEPARATOR_LEN;
                if offset < children_start {
                    TreeCursor::on_tag(
                        node.id.clone(),
                        TagPart::Opening,
                        offset.saturating_sub(*pos).min(opening_len),
                    )
                } else {
                    let mut child_pos = children_start;
                    match inverse(tree, serializer, &node.children, offset, &mut child_pos) {
                        Some(cursor) => cursor,
                        None => {
                            let closing_start = child_pos + SEPARATOR_LEN;
                            TreeCursor::on_tag(
                                node.id.clone(),
                                TagPart::Closing,
                                offset
                                    .saturating_sub(closing_start)
                                    .min(char_len(&tag.closing)),
                            )
                        }
                    }
                }
            }
            NodeKind::HtmlBlockCollapsed(tag) => {
                let child = tree.node(node.children[0]);
                let local = offset.saturating_sub(*pos + char_len(&tag.opening));
                TreeCursor::new(child.id.clone(), local.min(char_len(&child.content)))
            }
            kind => {
                let local = offset.saturating_sub(*pos + serializer.prefix_len(kind));
                TreeCursor::new(node.id.clone(), local.min(char_len(&node.content)))
            }
        };
        return Some(cursor);
    }
    None
}

/// Cursor at the very end of a top-level node.
fn end_of(tree: &SyntaxTree, idx: NodeIndex) -> TreeCursor {
    let node = tree.node(idx);
    match &node.kind {
        NodeKind::HtmlBlockContainer(tag) => {
            TreeCursor::on_tag(node.id.clone(), TagPart::Closing, char_len(&tag.closing))
        }
        NodeKind::HtmlBlockCollapsed(_) => {
            let child = tree.node(node.children[0]);
            TreeCursor::new(child.id.clone(), char_len(&child.content))
        }
        _ => TreeCursor::new(node.id.clone(), char_len(&node.content)),
    }
}

/// Single-line text of a node, as the serializer would emit it.
fn node_line<S: Serializer + ?Sized>(tree: &SyntaxTree, serializer: &S, idx: NodeIndex) -> String {
    let node = tree.node(idx);
    match &node.kind {
        NodeKind::HtmlBlockCollapsed(_) => {
            let child = tree.node(node.children[0]);
            serializer.line_text(&node.kind, &child.content)
        }
        NodeKind::HtmlBlockContainer(_) => serializer.to_markdown(tree, idx),
        kind => serializer.line_text(kind, &node.content),
    }
}

fn opening_tag_len(kind: &NodeKind) -> usize {
    match kind {
        NodeKind::HtmlBlockCollapsed(tag) | NodeKind::HtmlBlockContainer(tag) => {
            char_len(&tag.opening)
        }
        NodeKind::HtmlBlock { tag_name } => char_len(tag_name) + 2,
        _ => 0,
    }
}

fn closing_tag_len(kind: &NodeKind) -> usize {
    match kind {
        NodeKind::HtmlBlockCollapsed(tag) | NodeKind::HtmlBlockContainer(tag) => {
            char_len(&tag.closing)
        }
        NodeKind::HtmlBlock { tag_name } => char_len(tag_name) + 3,
        _ => 0,
    }
}
