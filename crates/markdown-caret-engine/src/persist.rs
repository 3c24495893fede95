//! Caret state that survives a reparse.
//!
//! Node ids are only valid until the tree is rebuilt, so what gets stored is
//! the absolute source-mode offset; it is re-resolved against the fresh tree.

use markdown_caret_config::SessionConfig;
use serde::{Deserialize, Serialize};

use crate::serialize::Serializer;
use crate::translate::{TreeCursor, from_absolute, to_absolute};
use crate::tree::SyntaxTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCaret {
    pub absolute_offset: usize,
}

impl PersistedCaret {
    /// Capture `cursor`, or `None` if its node is no longer in `tree`.
    pub fn capture<S: Serializer + ?Sized>(
        tree: &SyntaxTree,
        serializer: &S,
        cursor: &TreeCursor,
    ) -> Option<Self> {
        to_absolute(tree, serializer, cursor).map(|absolute_offset| Self { absolute_offset })
    }

    /// Capture `cursor`, falling back to the document start when its node
    /// has gone away.
    pub fn capture_or_start<S: Serializer + ?Sized>(
        tree: &SyntaxTree,
        serializer: &S,
        cursor: &TreeCursor,
    ) -> Self {
        Self::capture(tree, serializer, cursor).unwrap_or(Self { absolute_offset: 0 })
    }

    /// Resolve against a (possibly reparsed) tree. `None` only when the tree
    /// is empty; offsets past the end land on the last node.
    pub fn restore<S: Serializer + ?Sized>(
        &self,
        tree: &SyntaxTree,
        serializer: &S,
    ) -> Option<TreeCursor> {
        from_absolute(tree, serializer, self.absolute_offset)
    }

    /// Restore honouring `[session] restore_caret`; when disabled the caret
    /// goes to the start of the document instead.
    pub fn restore_with_config<S: Serializer + ?Sized>(
        &self,
        tree: &SyntaxTree,
        serializer: &S,
        session: &SessionConfig,
    ) -> Option<TreeCursor> {
        if session.restore_caret {
            self.restore(tree, serializer)
        } else {
            from_absolute(tree, serializer, 0)
        }
    }
}
