mod common;

use markdown_caret_engine::{
    FlatMode, MarkdownSerializer, NodeKind, OffsetIndex, SearchMatch, SearchOptions,
    SearchSession, TreeBuilder, TreeCursor, find_matches, segments_for_match,
};
use pretty_assertions::assert_eq;

fn regex_opts() -> SearchOptions {
    SearchOptions {
        use_regex: true,
        ..SearchOptions::default()
    }
}

fn segments(index: &OffsetIndex, m: &SearchMatch) -> Vec<(String, usize, usize)> {
    segments_for_match(index, m)
        .into_iter()
        .map(|s| (s.node_id.to_string(), s.start_offset, s.end_offset))
        .collect()
}

#[test]
fn test_plain_match_offsets_per_mode() {
    let tree = common::guide();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);
    let source = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Source);

    assert_eq!(
        find_matches(&writing, "first", &SearchOptions::default()),
        vec![
            SearchMatch { doc_start: 17, doc_end: 22 },
            SearchMatch { doc_start: 56, doc_end: 61 },
        ]
    );
    assert_eq!(
        find_matches(&source, "first", &SearchOptions::default()),
        vec![
            SearchMatch { doc_start: 23, doc_end: 28 },
            SearchMatch { doc_start: 139, doc_end: 144 },
        ]
    );
}

#[test]
fn test_formatting_is_invisible_in_writing_mode() {
    let tree = common::guide();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);
    let source = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Source);

    assert_eq!(find_matches(&writing, "read this", &SearchOptions::default()).len(), 1);
    assert!(find_matches(&source, "read this", &SearchOptions::default()).is_empty());
    assert!(find_matches(&writing, "[[backups]]", &SearchOptions::default()).is_empty());
    assert_eq!(find_matches(&source, "[[backups]]", &SearchOptions::default()).len(), 1);
}

#[test]
fn test_regex_across_container_children_splits_per_node() {
    let tree = common::guide();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);

    let matches = find_matches(&writing, r"Note\s+Keep", &regex_opts());
    assert_eq!(matches, vec![SearchMatch { doc_start: 25, doc_end: 35 }]);
    assert_eq!(
        segments(&writing, &matches[0]),
        vec![("note-h".to_string(), 0, 4), ("note-p".to_string(), 0, 4)]
    );
}

#[test]
fn test_source_container_match_is_one_segment() {
    let tree = common::guide();
    let source = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Source);

    let matches = find_matches(&source, r"Note\s+Keep", &regex_opts());
    assert_eq!(matches, vec![SearchMatch { doc_start: 72, doc_end: 82 }]);
    assert_eq!(segments(&source, &matches[0]), vec![("div".to_string(), 24, 34)]);
}

#[test]
fn test_collapsed_match_is_reported_on_wrapped_child() {
    let tree = common::guide();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);

    let matches = find_matches(&writing, "centered", &SearchOptions::default());
    assert_eq!(matches.len(), 1);
    assert_eq!(
        segments(&writing, &matches[0]),
        vec![("center-p".to_string(), 0, 8)]
    );
}

#[test]
fn test_session_reopened_after_mode_switch() {
    let tree = common::guide();
    let caret = TreeCursor::new("list", 0);
    let mut session = SearchSession::default();

    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);
    let selected = session.open(&writing, &tree, &MarkdownSerializer, "first", Some(&caret));
    assert_eq!(selected, Some(SearchMatch { doc_start: 56, doc_end: 61 }));
    assert_eq!(session.position(), Some((2, 2)));

    let source = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Source);
    let selected = session.open(&source, &tree, &MarkdownSerializer, "first", Some(&caret));
    assert_eq!(selected, Some(SearchMatch { doc_start: 139, doc_end: 144 }));
    assert_eq!(session.position(), Some((2, 2)));

    let highlights = session.highlights(&source);
    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[1].segment.node_id.as_str(), "list");
    assert_eq!(
        (highlights[1].segment.start_offset, highlights[1].segment.end_offset),
        (2, 7)
    );
    assert!(highlights[1].is_current);
}

#[test]
fn test_regex_across_skipped_image_sees_one_separator() {
    let tree = common::guide();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);

    let matches = find_matches(&writing, r"first\.\s+Note", &regex_opts());
    assert_eq!(matches, vec![SearchMatch { doc_start: 17, doc_end: 29 }]);
    assert_eq!(
        segments(&writing, &matches[0]),
        vec![("intro".to_string(), 10, 16), ("note-h".to_string(), 0, 4)]
    );
    assert!(find_matches(&writing, r"first\.\n\n\n\nNote", &regex_opts()).is_empty());
}

#[test]
fn test_writing_caret_after_inline_markup_selects_following_match() {
    let mut b = TreeBuilder::new();
    b.root("p", NodeKind::Paragraph, "**ab** cd ab");
    let tree = b.build().unwrap();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);

    // Just after "cd": content offset 9, bare offset 5.
    let caret = TreeCursor::new("p", 9);
    assert_eq!(writing.project(&tree, &MarkdownSerializer, &caret), 5);

    let mut session = SearchSession::default();
    let selected = session.open(&writing, &tree, &MarkdownSerializer, "ab", Some(&caret));
    assert_eq!(selected, Some(SearchMatch { doc_start: 6, doc_end: 8 }));
    assert_eq!(session.position(), Some((2, 2)));
}

#[test]
fn test_writing_caret_inside_collapsed_block_ignores_markup() {
    let mut b = TreeBuilder::new();
    b.root("intro", NodeKind::Paragraph, "ab");
    let c = b.root("c", NodeKind::collapsed("p"), "");
    b.child(c, "c-text", NodeKind::Paragraph, "[[ab]] then ab");
    let tree = b.build().unwrap();
    let writing = OffsetIndex::build(&tree, &MarkdownSerializer, FlatMode::Writing);

    // After "then": content offset 11, bare offset 7, entry starts at 4.
    let caret = TreeCursor::new("c-text", 11);
    assert_eq!(writing.project(&tree, &MarkdownSerializer, &caret), 11);

    let mut session = SearchSession::default();
    let selected = session.open(&writing, &tree, &MarkdownSerializer, "ab", Some(&caret));
    assert_eq!(selected, Some(SearchMatch { doc_start: 12, doc_end: 14 }));
}
