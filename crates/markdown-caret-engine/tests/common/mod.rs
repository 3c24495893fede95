// Shared fixture trees for the integration tests. Not every test file uses
// every helper.
#![allow(dead_code)]

use markdown_caret_engine::{HtmlTag, NodeKind, SyntaxTree, TreeBuilder};

/// A guide page exercising every node kind the offset rules special-case.
pub fn guide() -> SyntaxTree {
    let mut b = TreeBuilder::new();
    b.root("h", NodeKind::heading(1), "Guide");
    b.root("intro", NodeKind::Paragraph, "Read **this** first.");
    b.root("img", NodeKind::Image { url: "map.png".to_string() }, "map");
    let div = b.root(
        "div",
        NodeKind::HtmlBlockContainer(HtmlTag::with_opening("div", "<div class=\"note\">")),
        "",
    );
    b.child(div, "note-h", NodeKind::heading(3), "Note");
    b.child(div, "note-p", NodeKind::Paragraph, "Keep [[backups]].");
    b.child(div, "note-hr", NodeKind::HorizontalRule, "");
    let center = b.root("center", NodeKind::collapsed("center"), "");
    b.child(center, "center-p", NodeKind::Paragraph, "Centered");
    b.root("list", NodeKind::bullet(0), "first item");
    b.root("code", NodeKind::code(Some("sh")), "ls -la");
    b.build().unwrap()
}

/// Headings, paragraphs and list items only.
pub fn mixed_blocks() -> SyntaxTree {
    let mut b = TreeBuilder::new();
    b.root("title", NodeKind::heading(1), "Weekly notes");
    b.root("sub", NodeKind::heading(4), "Monday");
    b.root("para", NodeKind::Paragraph, "Met with the team about *scope*.");
    b.root("li-1", NodeKind::bullet(0), "Ship the index");
    b.root("li-2", NodeKind::bullet(1), "write tests");
    b.root("li-3", NodeKind::numbered(2, 3), "review");
    b.root(
        "task",
        NodeKind::ListItem {
            depth: 0,
            marker: markdown_caret_engine::ListMarker::Plus,
            task: Some(false),
        },
        "follow up",
    );
    b.root("quote", NodeKind::Blockquote, "Less is more");
    b.root("empty", NodeKind::Paragraph, "");
    b.root("tail", NodeKind::Paragraph, "ünïcödé tail");
    b.build().unwrap()
}

/// Containers nested inside containers, with a collapsed block at depth two.
pub fn nested_html() -> SyntaxTree {
    let mut b = TreeBuilder::new();
    let outer = b.root(
        "outer",
        NodeKind::HtmlBlockContainer(HtmlTag::with_opening("details", "<details open>")),
        "",
    );
    let inner = b.child(outer, "inner", NodeKind::container("section"), "");
    b.child(inner, "inner-h", NodeKind::heading(2), "Inner");
    let c = b.child(inner, "inner-c", NodeKind::collapsed("p"), "");
    b.child(c, "inner-c-text", NodeKind::Paragraph, "wrapped");
    b.child(outer, "outer-p", NodeKind::Paragraph, "after inner");
    b.root(
        "raw",
        NodeKind::HtmlBlock {
            tag_name: "table".to_string(),
        },
        "<table><tr><td>1 &amp; 2</td></tr></table>",
    );
    b.root("table", NodeKind::Table, "| a | b |\n|---|---|\n| 1 | 2 |");
    b.build().unwrap()
}

pub fn single_paragraph() -> SyntaxTree {
    let mut b = TreeBuilder::new();
    b.root("only", NodeKind::Paragraph, "Just one block");
    b.build().unwrap()
}
