//! Arena-backed syntax tree consumed by the offset algorithms.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeIndex`]; the
//! parent link is an index too, so walking up never needs a back-reference.
//! [`NodeId`] is the host's stable identity and is what cursors persist.

pub mod kind;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use kind::{HtmlTag, ListMarker, NodeKind};

/// Stable, opaque node identity supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh id for hosts that do not carry their own.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Slot of a node in the arena. Only meaningful for the tree that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Node-local text; meaning depends on `kind`
    pub content: String,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),
    #[error("heading level {level} out of range for node {id}")]
    InvalidHeadingLevel { id: NodeId, level: u8 },
    #[error("node {id} of kind {kind} cannot hold children")]
    UnexpectedChildren { id: NodeId, kind: String },
    #[error("collapsed html block {id} must wrap exactly one paragraph, found {found} children")]
    MalformedCollapsed { id: NodeId, found: usize },
    #[error("html container {0} has no children")]
    EmptyContainer(NodeId),
}

/// Immutable document tree. Build one with [`TreeBuilder`].
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    roots: Vec<NodeIndex>,
    by_id: HashMap<NodeId, NodeIndex>,
}

impl SyntaxTree {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    pub fn node(&self, idx: NodeIndex) -> &SyntaxNode {
        &self.nodes[idx.0]
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, id: &NodeId) -> Option<&SyntaxNode> {
        self.index_of(id).map(|idx| self.node(idx))
    }

    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.nodes[idx.0].children
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.nodes[idx.0].parent
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.parent(idx), move |&p| self.parent(p))
    }

    /// All nodes in document order (pre-order).
    pub fn descendants(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeIndex> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.children(idx).iter().rev().copied());
        }
        out
    }

    /// Last top-level node, used as the landing spot for past-the-end offsets.
    pub fn last_root(&self) -> Option<NodeIndex> {
        self.roots.last().copied()
    }
}

/// Collects nodes and validates the shape on [`TreeBuilder::build`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    roots: Vec<NodeIndex>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level node.
    pub fn root(
        &mut self,
        id: impl Into<NodeId>,
        kind: NodeKind,
        content: impl Into<String>,
    ) -> NodeIndex {
        let idx = self.push(id.into(), kind, content.into(), None);
        self.roots.push(idx);
        idx
    }

    /// Append a child under `parent`.
    pub fn child(
        &mut self,
        parent: NodeIndex,
        id: impl Into<NodeId>,
        kind: NodeKind,
        content: impl Into<String>,
    ) -> NodeIndex {
        let idx = self.push(id.into(), kind, content.into(), Some(parent));
        self.nodes[parent.0].children.push(idx);
        idx
    }

    fn push(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        content: String,
        parent: Option<NodeIndex>,
    ) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(SyntaxNode {
            id,
            kind,
            content,
            parent,
            children: Vec::new(),
        });
        idx
    }

    pub fn build(self) -> Result<SyntaxTree, TreeError> {
        let mut by_id = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if by_id.insert(node.id.clone(), NodeIndex(i)).is_some() {
                return Err(TreeError::DuplicateId(node.id.clone()));
            }
            self.validate(node)?;
        }

        Ok(SyntaxTree {
            nodes: self.nodes,
            roots: self.roots,
            by_id,
        })
    }

    fn validate(&self, node: &SyntaxNode) -> Result<(), TreeError> {
        match &node.kind {
            NodeKind::Heading { level } if !(1..=6).contains(level) => {
                Err(TreeError::InvalidHeadingLevel {
                    id: node.id.clone(),
                    level: *level,
                })
            }
            NodeKind::HtmlBlockCollapsed(_) => {
                let wraps_paragraph = node.children.len() == 1
                    && self.nodes[node.children[0].0].kind == NodeKind::Paragraph;
                if wraps_paragraph {
                    Ok(())
                } else {
                    Err(TreeError::MalformedCollapsed {
                        id: node.id.clone(),
                        found: node.children.len(),
                    })
                }
            }
            NodeKind::HtmlBlockContainer(_) if node.children.is_empty() => {
                Err(TreeError::EmptyContainer(node.id.clone()))
            }
            kind if !kind.holds_children() && !node.children.is_empty() => {
                Err(TreeError::UnexpectedChildren {
                    id: node.id.clone(),
                    kind: kind.name(),
                })
            }
            _ => Ok(()),
        }
    }
}
