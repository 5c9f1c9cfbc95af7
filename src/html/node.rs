//! Flattened, display-ready nodes produced from post HTML

use serde::{Deserialize, Serialize};

/// A single display-ready node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlatNode {
    /// A literal run of text
    Text(TextNode),
    /// A hyperlink with its anchor text
    Link(LinkNode),
    /// A `<p>` block and its flattened content
    Paragraph(Paragraph),
}

/// A literal run of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    /// Text content, entities already decoded
    pub text: String,
}

/// A hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkNode {
    /// Link target (empty when the anchor had no `href`)
    pub href: String,
    /// Anchor text
    pub text: String,
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Children in document order
    pub children: Vec<FlatNode>,
}

impl FlatNode {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextNode { text: text.into() })
    }

    /// Create a link node
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Link(LinkNode {
            href: href.into(),
            text: text.into(),
        })
    }

    /// Create a paragraph node
    pub fn paragraph(children: Vec<FlatNode>) -> Self {
        Self::Paragraph(Paragraph { children })
    }

    /// Line break, as emitted for `<br>`
    pub fn line_break() -> Self {
        Self::text("\n")
    }
}

/// Collect every link in document order, including those inside paragraphs
pub fn links(nodes: &[FlatNode]) -> Vec<&LinkNode> {
    let mut out = Vec::new();
    let mut pending: Vec<std::slice::Iter<'_, FlatNode>> = vec![nodes.iter()];

    while let Some(iter) = pending.last_mut() {
        match iter.next() {
            Some(FlatNode::Link(link)) => out.push(link),
            Some(FlatNode::Paragraph(p)) => pending.push(p.children.iter()),
            Some(FlatNode::Text(_)) => {}
            None => {
                pending.pop();
            }
        }
    }

    out
}
