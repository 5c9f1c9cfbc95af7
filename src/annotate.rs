//! Pairs statuses with their flattened bodies

use crate::html::{FlatNode, HtmlParser};
use crate::models::Status;

/// A status together with its flattened content
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedStatus {
    /// The status as returned by the API, with `reblog` moved out into
    /// [`AnnotatedStatus::reblog`]
    pub status: Status,
    /// `status.content`, flattened
    pub content: Vec<FlatNode>,
    /// The boosted status, annotated, when `status` is a boost
    pub reblog: Option<Box<AnnotatedStatus>>,
}

impl AnnotatedStatus {
    /// The annotated status whose content should be shown
    pub fn displayed(&self) -> &AnnotatedStatus {
        self.reblog.as_deref().unwrap_or(self)
    }

    /// Whether this status is a boost of another one
    pub const fn is_reblog(&self) -> bool {
        self.reblog.is_some()
    }
}

/// Flattens status bodies once so they can be rendered repeatedly
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAnnotator {
    parser: HtmlParser,
}

impl StatusAnnotator {
    /// Create an annotator using the given parser
    pub const fn new(parser: HtmlParser) -> Self {
        Self { parser }
    }

    /// Annotate a single status (and the status it boosts, if any)
    pub fn annotate(&self, mut status: Status) -> AnnotatedStatus {
        let content = self.parser.parse(&status.content);
        tracing::trace!("Status {} flattened into {} nodes", status.id, content.len());

        let reblog = status
            .reblog
            .take()
            .map(|inner| Box::new(self.annotate(*inner)));

        AnnotatedStatus {
            status,
            content,
            reblog,
        }
    }

    /// Annotate a page of statuses, preserving order
    pub fn annotate_all(&self, statuses: Vec<Status>) -> Vec<AnnotatedStatus> {
        statuses.into_iter().map(|s| self.annotate(s)).collect()
    }
}
