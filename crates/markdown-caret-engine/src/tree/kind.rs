/// Marker used by a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    Dash,          // "-"
    Asterisk,      // "*"
    Plus,          // "+"
    Numbered(u32), // "1.", "2.", etc.
}

impl ListMarker {
    /// The marker text as written, without the trailing space.
    pub fn as_text(&self) -> String {
        match self {
            ListMarker::Dash => "-".to_string(),
            ListMarker::Asterisk => "*".to_string(),
            ListMarker::Plus => "+".to_string(),
            ListMarker::Numbered(n) => format!("{n}."),
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, ListMarker::Numbered(_))
    }
}

/// Opening and closing tag text of an HTML block.
///
/// `opening` is kept verbatim (attributes included) so serialized lengths
/// stay exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTag {
    pub name: String,
    pub opening: String,
    pub closing: String,
}

impl HtmlTag {
    /// Bare `<name>` / `</name>` pair.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            opening: format!("<{name}>"),
            closing: format!("</{name}>"),
            name,
        }
    }

    /// Tag with a verbatim opening line, e.g. `<div class="note">`.
    pub fn with_opening(name: impl Into<String>, opening: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            opening: opening.into(),
            closing: format!("</{name}>"),
            name,
        }
    }
}

/// The kind of a syntax node.
///
/// HTML blocks come in three shapes: a raw childless block, a collapsed block
/// rendered on one line around a single paragraph (`<tag>text</tag>`), and a
/// container whose children sit between tag lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph,
    /// ATX heading, level 1..=6
    Heading { level: u8 },
    ListItem {
        /// Nesting depth, 0 for top-level items
        depth: usize,
        marker: ListMarker,
        /// `Some(checked)` for task list items
        task: Option<bool>,
    },
    Blockquote,
    CodeBlock { language: Option<String> },
    Table,
    HorizontalRule,
    /// Image; the node content is the alt text
    Image { url: String },
    /// Raw HTML kept verbatim in the node content
    HtmlBlock { tag_name: String },
    HtmlBlockCollapsed(HtmlTag),
    HtmlBlockContainer(HtmlTag),
}

impl NodeKind {
    pub fn heading(level: u8) -> Self {
        NodeKind::Heading { level }
    }

    pub fn bullet(depth: usize) -> Self {
        NodeKind::ListItem {
            depth,
            marker: ListMarker::Dash,
            task: None,
        }
    }

    pub fn numbered(depth: usize, number: u32) -> Self {
        NodeKind::ListItem {
            depth,
            marker: ListMarker::Numbered(number),
            task: None,
        }
    }

    pub fn code(language: Option<&str>) -> Self {
        NodeKind::CodeBlock {
            language: language.map(str::to_string),
        }
    }

    pub fn collapsed(tag: &str) -> Self {
        NodeKind::HtmlBlockCollapsed(HtmlTag::new(tag))
    }

    pub fn container(tag: &str) -> Self {
        NodeKind::HtmlBlockContainer(HtmlTag::new(tag))
    }

    /// Tag strings for either HTML block variant that carries them.
    pub fn html_tag(&self) -> Option<&HtmlTag> {
        match self {
            NodeKind::HtmlBlockCollapsed(tag) | NodeKind::HtmlBlockContainer(tag) => Some(tag),
            _ => None,
        }
    }

    /// Whether nodes of this kind may own children.
    pub fn holds_children(&self) -> bool {
        matches!(
            self,
            NodeKind::HtmlBlockCollapsed(_) | NodeKind::HtmlBlockContainer(_)
        )
    }

    /// Short name used in debug dumps.
    pub fn name(&self) -> String {
        match self {
            NodeKind::Paragraph => "paragraph".to_string(),
            NodeKind::Heading { level } => format!("heading{level}"),
            NodeKind::ListItem { .. } => "list-item".to_string(),
            NodeKind::Blockquote => "blockquote".to_string(),
            NodeKind::CodeBlock { .. } => "code-block".to_string(),
            NodeKind::Table => "table".to_string(),
            NodeKind::HorizontalRule => "horizontal-rule".to_string(),
            NodeKind::Image { .. } => "image".to_string(),
            NodeKind::HtmlBlock { .. } => "html-block".to_string(),
            NodeKind::HtmlBlockCollapsed(_) => "html-block(collapsed)".to_string(),
            NodeKind::HtmlBlockContainer(_) => "html-block(container)".to_string(),
        }
    }
}
