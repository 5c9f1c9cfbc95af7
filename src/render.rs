//! Terminal rendering of flattened post bodies

use crate::html::{FlatNode, LinkNode};

/// How flattened nodes are turned into terminal text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap width in columns (0 = no wrapping)
    pub width: usize,
    /// Append ` <href>` after link text when the two differ
    pub show_link_targets: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            show_link_targets: true,
        }
    }
}

impl RenderOptions {
    /// No wrapping, no link targets
    pub const fn plain() -> Self {
        Self {
            width: 0,
            show_link_targets: false,
        }
    }
}

/// Render nodes as text: paragraphs become blocks separated by a blank line,
/// `"\n"` runs break lines, and every line is wrapped to `options.width`.
pub fn render(nodes: &[FlatNode], options: &RenderOptions) -> String {
    blocks(nodes, options)
        .iter()
        .map(|block| wrap(block, options.width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Concatenated text of the nodes, with a blank line between paragraphs
pub fn plain_text(nodes: &[FlatNode]) -> String {
    render(nodes, &RenderOptions::plain())
}

fn blocks(nodes: &[FlatNode], options: &RenderOptions) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inline = String::new();

    for node in nodes {
        if let FlatNode::Paragraph(p) = node {
            push_block(&mut blocks, std::mem::take(&mut inline));
            let mut text = String::new();
            write_inline(&p.children, options, &mut text);
            push_block(&mut blocks, text);
        } else {
            write_inline(std::slice::from_ref(node), options, &mut inline);
        }
    }
    push_block(&mut blocks, inline);

    blocks
}

fn push_block(blocks: &mut Vec<String>, text: String) {
    let text = text.trim_matches('\n');
    if !text.trim().is_empty() {
        blocks.push(text.to_string());
    }
}

/// Paragraphs nested inside a paragraph are set off by line breaks
fn write_inline(nodes: &[FlatNode], options: &RenderOptions, out: &mut String) {
    let mut pending: Vec<std::slice::Iter<'_, FlatNode>> = vec![nodes.iter()];

    while let Some(iter) = pending.last_mut() {
        match iter.next() {
            Some(FlatNode::Text(t)) => out.push_str(&t.text),
            Some(FlatNode::Link(link)) => write_link(link, options, out),
            Some(FlatNode::Paragraph(p)) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                pending.push(p.children.iter());
            }
            None => {
                pending.pop();
                // Close a nested paragraph, but not the top level
                if !pending.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}

fn write_link(link: &LinkNode, options: &RenderOptions, out: &mut String) {
    out.push_str(&link.text);

    // Mentions and hashtags already say where they go
    let self_describing = link.text.starts_with('@') || link.text.starts_with('#');
    if options.show_link_targets
        && !link.href.is_empty()
        && link.href != link.text
        && !self_describing
    {
        out.push_str(" <");
        out.push_str(&link.href);
        out.push('>');
    }
}

fn wrap(block: &str, width: usize) -> String {
    if width == 0 {
        return block.to_string();
    }
    block
        .split('\n')
        .map(|line| textwrap::fill(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}
