//! Offset mapping between a markdown syntax tree and its flat text forms.
//!
//! - **`translate`**: tree cursor ⇄ absolute source-mode offset
//! - **`index`**: node span index for source or writing mode
//! - **`search`**: plain/regex search over an index, matches split per node
//! - **`persist`**: caret state that survives a reparse
//!
//! Everything is a pure function of a [`SyntaxTree`] snapshot and a
//! [`Serializer`]; rebuild the index whenever either the tree or the active
//! mode changes.

pub mod index;
pub mod persist;
pub mod search;
pub mod serialize;
pub mod text;
pub mod translate;
pub mod tree;

// Re-export key types for easier usage
pub use index::{FlatMode, IndexMismatch, OffsetIndex, OffsetMapEntry, format_index, reconstruct};
pub use persist::PersistedCaret;
pub use search::{
    Highlight, MatchSegment, SearchMatch, SearchOptions, SearchSession, closest_match,
    find_matches, segments_for_match,
};
pub use serialize::{BLOCK_SEPARATOR, MarkdownSerializer, SEPARATOR_LEN, Serializer};
pub use translate::{TagPart, TreeCursor, from_absolute, to_absolute};
pub use tree::{
    HtmlTag, ListMarker, NodeId, NodeIndex, NodeKind, SyntaxNode, SyntaxTree, TreeBuilder,
    TreeError,
};
