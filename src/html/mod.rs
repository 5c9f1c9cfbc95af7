//! Flattening of post HTML into display-ready nodes
//!
//! Mastodon returns post bodies as HTML fragments. Rather than carrying a
//! general-purpose HTML renderer, we reduce the markup to three kinds of
//! node: text runs, links and paragraphs. `<br>` becomes a `"\n"` text run,
//! and every other element is transparent: its own identity is dropped and
//! its children surface in its place.
//!
//! Parsing goes through an HTML5 tree builder, so unclosed tags and missing
//! `<html>`/`<body>` wrappers are repaired the way a browser would repair
//! them. Nothing is executed or fetched. `<template>` content is held in a
//! separate document fragment by the tree builder and is not flattened.
//!
//! ```
//! use woolly::html::{self, FlatNode};
//!
//! let nodes = html::parse(r#"<p>hi <a href="https://x">there</a></p>"#);
//! assert_eq!(
//!     nodes,
//!     vec![FlatNode::paragraph(vec![
//!         FlatNode::text("hi "),
//!         FlatNode::link("https://x", "there"),
//!     ])]
//! );
//! ```

mod node;

pub use node::{FlatNode, LinkNode, Paragraph, TextNode, links};

use ego_tree::NodeRef;
use ego_tree::iter::Children;
use scraper::{ElementRef, Html, Node};

/// Elements the flattener recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    /// `<a>`: emitted as a link, children are not flattened
    Anchor,
    /// `<p>`: emitted as a paragraph of its flattened children
    Paragraph,
    /// `<br>`: emitted as a newline text run
    LineBreak,
    /// Anything else: children are spliced into the current level
    Transparent,
}

impl Tag {
    fn from_name(name: &str) -> Self {
        match name {
            "a" => Self::Anchor,
            "p" => Self::Paragraph,
            "br" => Self::LineBreak,
            _ => Self::Transparent,
        }
    }
}

/// Stateless HTML flattener
///
/// A value type so it can be handed to whatever needs to parse post bodies
/// (see [`crate::annotate::StatusAnnotator`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a parser
    pub const fn new() -> Self {
        Self
    }

    /// Flatten an HTML fragment
    pub fn parse(&self, html: &str) -> Vec<FlatNode> {
        parse(html)
    }
}

/// Flatten an HTML fragment into display-ready nodes, in document order.
///
/// Total over any input: malformed markup is repaired by the tree builder and
/// an empty string yields an empty vector.
pub fn parse(html: &str) -> Vec<FlatNode> {
    let document = Html::parse_document(html);

    match body(&document) {
        Some(body) => flatten(*body),
        None => Vec::new(),
    }
}

fn body(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
}

/// What an open element contributes to its parent once all its children
/// have been visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Paragraph,
    Transparent,
}

struct Frame<'a> {
    children: Children<'a, Node>,
    nodes: Vec<FlatNode>,
    kind: FrameKind,
}

impl<'a> Frame<'a> {
    fn new(element: NodeRef<'a, Node>, kind: FrameKind) -> Self {
        Self {
            children: element.children(),
            nodes: Vec::new(),
            kind,
        }
    }
}

enum Step<'a> {
    Emit(FlatNode),
    Descend(NodeRef<'a, Node>, FrameKind),
    Skip,
}

fn classify(node: NodeRef<'_, Node>) -> Step<'_> {
    match node.value() {
        Node::Text(text) => Step::Emit(FlatNode::text(&**text)),
        Node::Element(element) => match Tag::from_name(element.name()) {
            Tag::Anchor => {
                let text: String = ElementRef::wrap(node)
                    .map(|el| el.text().collect())
                    .unwrap_or_default();
                let href = element.attr("href").unwrap_or_default();
                Step::Emit(FlatNode::link(href, text))
            }
            Tag::LineBreak => Step::Emit(FlatNode::line_break()),
            Tag::Paragraph => Step::Descend(node, FrameKind::Paragraph),
            Tag::Transparent => Step::Descend(node, FrameKind::Transparent),
        },
        // Comments, doctypes, processing instructions
        _ => Step::Skip,
    }
}

/// Depth-first walk with an explicit stack, so deeply nested markup costs
/// heap rather than call stack.
fn flatten(root: NodeRef<'_, Node>) -> Vec<FlatNode> {
    let mut stack = vec![Frame::new(root, FrameKind::Root)];

    loop {
        let Some(frame) = stack.last_mut() else {
            return Vec::new();
        };

        let Some(child) = frame.children.next() else {
            let Some(done) = stack.pop() else {
                return Vec::new();
            };
            match stack.last_mut() {
                None => return done.nodes,
                Some(parent) => match done.kind {
                    FrameKind::Paragraph => {
                        parent.nodes.push(FlatNode::paragraph(done.nodes));
                    }
                    FrameKind::Transparent | FrameKind::Root => {
                        parent.nodes.extend(done.nodes);
                    }
                },
            }
            continue;
        };

        match classify(child) {
            Step::Emit(node) => frame.nodes.push(node),
            Step::Descend(element, kind) => stack.push(Frame::new(element, kind)),
            Step::Skip => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("hello world"), vec![FlatNode::text("hello world")]);
    }

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        for input in ["line one\nline two", "ünï 🐑", "trail  ", "a < b", "1 & 2"] {
            assert_eq!(parse(input), vec![FlatNode::text(input)], "{input:?}");
        }
    }

    #[test]
    fn test_plain_text_tree_builder_normalization() {
        // Whitespace before any content is dropped ahead of <body>
        assert_eq!(parse("  lead"), vec![FlatNode::text("lead")]);
        assert!(parse("\n").is_empty());
        // CR LF becomes LF, NUL is removed
        assert_eq!(parse("a\r\nb"), vec![FlatNode::text("a\nb")]);
        assert_eq!(parse("a\0b"), vec![FlatNode::text("ab")]);
    }

    #[test]
    fn test_template_content_is_not_flattened() {
        assert_eq!(parse("<template>t</template>z"), vec![FlatNode::text("z")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_link() {
        assert_eq!(
            parse(r#"<a href="https://x">hi</a>"#),
            vec![FlatNode::link("https://x", "hi")]
        );
    }

    #[test]
    fn test_link_without_href() {
        assert_eq!(parse("<a>anchor</a>"), vec![FlatNode::link("", "anchor")]);
    }

    #[test]
    fn test_link_text_is_opaque() {
        let html = r#"<a href="https://m.s/@bob" class="u-url mention">@<span>bob</span></a>"#;
        assert_eq!(parse(html), vec![FlatNode::link("https://m.s/@bob", "@bob")]);
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            parse("<p>a</p><p>b</p>"),
            vec![
                FlatNode::paragraph(vec![FlatNode::text("a")]),
                FlatNode::paragraph(vec![FlatNode::text("b")]),
            ]
        );
    }

    #[test]
    fn test_line_break() {
        assert_eq!(
            parse("line1<br>line2"),
            vec![
                FlatNode::text("line1"),
                FlatNode::text("\n"),
                FlatNode::text("line2"),
            ]
        );
    }

    #[test]
    fn test_transparent_tag() {
        assert_eq!(parse("<span>hello</span>"), vec![FlatNode::text("hello")]);
    }

    #[test]
    fn test_transparent_tags_keep_recognized_descendants() {
        assert_eq!(
            parse(r#"<div><em>a<br><a href="u">b</a></em></div>"#),
            vec![
                FlatNode::text("a"),
                FlatNode::line_break(),
                FlatNode::link("u", "b"),
            ]
        );
    }

    #[test]
    fn test_comments_ignored() {
        assert_eq!(
            parse("a<!-- hidden -->b"),
            vec![FlatNode::text("a"), FlatNode::text("b")]
        );
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            parse("fish &amp; chips &lt;3"),
            vec![FlatNode::text("fish & chips <3")]
        );
    }

    #[test]
    fn test_unclosed_paragraphs_become_siblings() {
        assert_eq!(
            parse("<p>a<p>b"),
            vec![
                FlatNode::paragraph(vec![FlatNode::text("a")]),
                FlatNode::paragraph(vec![FlatNode::text("b")]),
            ]
        );
    }

    #[test]
    fn test_scoped_paragraph_nests_inside_parent() {
        // <button> scopes <p>, so the inner paragraph stays inside the outer one
        assert_eq!(
            parse("<p>x<button><p>y</p></button></p>"),
            vec![FlatNode::paragraph(vec![
                FlatNode::text("x"),
                FlatNode::paragraph(vec![FlatNode::text("y")]),
            ])]
        );
    }

    #[test]
    fn test_mastodon_status_body() {
        let html = concat!(
            r#"<p>Hello <span class="h-card"><a href="https://mastodon.social/@alice" class="u-url mention">@<span>alice</span></a></span>!</p>"#,
            r#"<p>Check <a href="https://example.com/post" rel="nofollow noopener noreferrer" target="_blank"><span class="invisible">https://</span><span class="">example.com/post</span></a><br>bye</p>"#,
        );
        assert_eq!(
            parse(html),
            vec![
                FlatNode::paragraph(vec![
                    FlatNode::text("Hello "),
                    FlatNode::link("https://mastodon.social/@alice", "@alice"),
                    FlatNode::text("!"),
                ]),
                FlatNode::paragraph(vec![
                    FlatNode::text("Check "),
                    FlatNode::link("https://example.com/post", "https://example.com/post"),
                    FlatNode::line_break(),
                    FlatNode::text("bye"),
                ]),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let html = r#"<p>one <b>two</b></p><a href="h">three</a>"#;
        assert_eq!(parse(html), parse(html));
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 2_000;
        let html = format!("{}deep{}", "<span>".repeat(depth), "</span>".repeat(depth));
        assert_eq!(parse(&html), vec![FlatNode::text("deep")]);
    }

    #[test]
    fn test_parser_value() {
        let parser = HtmlParser::new();
        assert_eq!(parser.parse("<i>x</i>"), parse("<i>x</i>"));
    }
}
