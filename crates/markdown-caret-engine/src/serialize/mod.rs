//! Serialization of the tree into its two flat forms.
//!
//! The offset algorithms never inspect markdown syntax themselves; they
//! measure whatever a [`Serializer`] emits. [`MarkdownSerializer`] is the
//! reference implementation, and hosts with their own serializer implement
//! the trait so offsets stay bit-exact with what they display.

pub mod inline;

use crate::text::{char_len, char_slice};
use crate::tree::{NodeIndex, NodeKind, SyntaxTree};

/// Separator emitted between sibling blocks in both flat forms.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Length of [`BLOCK_SEPARATOR`] in characters.
pub const SEPARATOR_LEN: usize = 2;

pub trait Serializer {
    /// Markdown for a single node line built from its kind and content.
    fn line_text(&self, kind: &NodeKind, content: &str) -> String;

    /// Characters of leading syntax before the content, e.g. 3 for `"## "`.
    fn prefix_len(&self, kind: &NodeKind) -> usize;

    /// Writing-mode length of the first `offset` characters of `content`.
    ///
    /// Carries a caret from node content, which may hold inline markup, into
    /// the node's bare text.
    fn bare_prefix_len(&self, kind: &NodeKind, content: &str, offset: usize) -> usize;

    /// Source-mode text of one node, children included.
    fn to_markdown(&self, tree: &SyntaxTree, idx: NodeIndex) -> String;

    /// Writing-mode text of one node; empty for purely visual nodes.
    fn to_bare_text(&self, tree: &SyntaxTree, idx: NodeIndex) -> String;

    /// Source-mode text of the whole document.
    fn document_markdown(&self, tree: &SyntaxTree) -> String {
        join_markdown(self, tree, tree.roots())
    }

    /// Writing-mode text of the whole document. Empty blocks are skipped
    /// without a separator.
    fn document_bare_text(&self, tree: &SyntaxTree) -> String {
        join_bare_text(self, tree, tree.roots())
    }
}

fn join_markdown<S: Serializer + ?Sized>(
    serializer: &S,
    tree: &SyntaxTree,
    nodes: &[NodeIndex],
) -> String {
    nodes
        .iter()
        .map(|&idx| serializer.to_markdown(tree, idx))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn join_bare_text<S: Serializer + ?Sized>(
    serializer: &S,
    tree: &SyntaxTree,
    nodes: &[NodeIndex],
) -> String {
    nodes
        .iter()
        .map(|&idx| serializer.to_bare_text(tree, idx))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Reference serializer for the node kinds in [`NodeKind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSerializer;

impl MarkdownSerializer {
    fn list_prefix(depth: usize, marker: &crate::tree::ListMarker, task: Option<bool>) -> String {
        let mut prefix = "  ".repeat(depth);
        prefix.push_str(&marker.as_text());
        prefix.push(' ');
        match task {
            Some(true) => prefix.push_str("[x] "),
            Some(false) => prefix.push_str("[ ] "),
            None => {}
        }
        prefix
    }
}

impl Serializer for MarkdownSerializer {
    fn line_text(&self, kind: &NodeKind, content: &str) -> String {
        match kind {
            NodeKind::Paragraph | NodeKind::Table | NodeKind::HtmlBlock { .. } => {
                content.to_string()
            }
            NodeKind::Heading { level } => {
                format!("{} {content}", "#".repeat(*level as usize))
            }
            NodeKind::ListItem {
                depth,
                marker,
                task,
            } => format!("{}{content}", Self::list_prefix(*depth, marker, *task)),
            NodeKind::Blockquote => format!("> {content}"),
            NodeKind::CodeBlock { language } => {
                format!("```{}\n{content}\n```", language.as_deref().unwrap_or(""))
            }
            NodeKind::HorizontalRule => "---".to_string(),
            NodeKind::Image { url } => format!("![{content}]({url})"),
            NodeKind::HtmlBlockCollapsed(tag) | NodeKind::HtmlBlockContainer(tag) => {
                format!("{}{content}{}", tag.opening, tag.closing)
            }
        }
    }

    fn prefix_len(&self, kind: &NodeKind) -> usize {
        match kind {
            NodeKind::Heading { level } => *level as usize + 1,
            NodeKind::ListItem {
                depth,
                marker,
                task,
            } => char_len(&Self::list_prefix(*depth, marker, *task)),
            NodeKind::Blockquote => 2,
            NodeKind::CodeBlock { language } => {
                4 + language.as_deref().map(char_len).unwrap_or(0)
            }
            NodeKind::Image { .. } => 2,
            NodeKind::Paragraph
            | NodeKind::Table
            | NodeKind::HorizontalRule
            | NodeKind::HtmlBlock { .. }
            | NodeKind::HtmlBlockCollapsed(_)
            | NodeKind::HtmlBlockContainer(_) => 0,
        }
    }

    fn bare_prefix_len(&self, kind: &NodeKind, content: &str, offset: usize) -> usize {
        let prefix = char_slice(content, 0, offset);
        match kind {
            NodeKind::HorizontalRule
            | NodeKind::Image { .. }
            | NodeKind::HtmlBlockCollapsed(_)
            | NodeKind::HtmlBlockContainer(_) => 0,
            NodeKind::CodeBlock { .. } | NodeKind::Table => char_len(prefix),
            NodeKind::HtmlBlock { .. } => char_len(&inline::strip_html(prefix)),
            NodeKind::Paragraph
            | NodeKind::Heading { .. }
            | NodeKind::ListItem { .. }
            | NodeKind::Blockquote => char_len(&inline::strip_inline(prefix)),
        }
    }

    fn to_markdown(&self, tree: &SyntaxTree, idx: NodeIndex) -> String {
        let node = tree.node(idx);
        match &node.kind {
            NodeKind::HtmlBlockContainer(tag) => {
                let inner = join_markdown(self, tree, &node.children);
                [tag.opening.as_str(), inner.as_str(), tag.closing.as_str()].join(BLOCK_SEPARATOR)
            }
            NodeKind::HtmlBlockCollapsed(_) => {
                let child = tree.node(node.children[0]);
                self.line_text(&node.kind, &child.content)
            }
            kind => self.line_text(kind, &node.content),
        }
    }

    fn to_bare_text(&self, tree: &SyntaxTree, idx: NodeIndex) -> String {
        let node = tree.node(idx);
        match &node.kind {
            NodeKind::HtmlBlockContainer(_) => join_bare_text(self, tree, &node.children),
            NodeKind::HtmlBlockCollapsed(_) => self.to_bare_text(tree, node.children[0]),
            NodeKind::HorizontalRule | NodeKind::Image { .. } => String::new(),
            NodeKind::CodeBlock { .. } | NodeKind::Table => node.content.clone(),
            NodeKind::HtmlBlock { .. } => inline::strip_html(&node.content),
            NodeKind::Paragraph
            | NodeKind::Heading { .. }
            | NodeKind::ListItem { .. }
            | NodeKind::Blockquote => inline::strip_inline(&node.content),
        }
    }
}
