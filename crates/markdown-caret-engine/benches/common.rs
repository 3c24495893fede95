// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use markdown_caret_engine::{NodeKind, SyntaxTree, TreeBuilder};

/// `sections` repetitions of a heading, paragraph, list and html block.
#[allow(dead_code)]
pub fn generate_tree(sections: usize) -> SyntaxTree {
    let mut b = TreeBuilder::new();
    for i in 0..sections {
        b.root(format!("h-{i}"), NodeKind::heading(2), format!("Section {i}"));
        b.root(
            format!("p-{i}"),
            NodeKind::Paragraph,
            "Paragraph with **some** content and a [[link]].",
        );
        b.root(format!("li-{i}-a"), NodeKind::bullet(0), "Bullet point");
        b.root(format!("li-{i}-b"), NodeKind::bullet(1), "Nested item");
        let div = b.root(format!("div-{i}"), NodeKind::container("div"), "");
        b.child(div, format!("div-{i}-p"), NodeKind::Paragraph, "Inside a div");
        let c = b.child(div, format!("div-{i}-c"), NodeKind::collapsed("p"), "");
        b.child(c, format!("div-{i}-c-text"), NodeKind::Paragraph, "wrapped text");
        b.root(format!("code-{i}"), NodeKind::code(Some("rust")), "fn main() {}");
    }
    b.build().unwrap()
}
