//! # Woolly 🐑
//!
//! A Mastodon client whose core turns post HTML into display-ready nodes.
//!
//! ## Overview
//!
//! Mastodon serves post bodies as HTML. Woolly flattens that HTML into a
//! short list of text runs, links and paragraphs, which any presentation
//! layer can draw without carrying a general-purpose HTML renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          CLI                                │
//! │     Loads config, fetches statuses, prints rendered text    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │       API       │ │     Render      │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • Timelines     │ │ • Paragraphs    │
//! │ • Env overrides │ │ • Notifications │ │ • Links         │
//! │ • Render opts   │ │ • Trends/Search │ │ • Wrapping      │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │    Annotate     │ │      HTML       │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Status + body │ │ • Flatten DOM   │ │ • Status        │
//! │ • Boosts        │ │ • FlatNode      │ │ • Notification  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`html`] — HTML flattening and the [`FlatNode`] model
//! - [`render`] — Terminal rendering of flattened nodes
//! - [`annotate`] — Statuses paired with their flattened bodies
//! - [`api`] — Mastodon REST client
//! - [`models`] — Data models (Status, Account, Notification, Tag)
//! - [`time`] — Relative timestamps
//! - [`config`] — Configuration management
//!
//! ## Example
//!
//! ```
//! use woolly::html::{self, FlatNode};
//!
//! let nodes = html::parse("line1<br>line2");
//! assert_eq!(
//!     nodes,
//!     vec![FlatNode::text("line1"), FlatNode::text("\n"), FlatNode::text("line2")]
//! );
//! assert_eq!(woolly::render::plain_text(&nodes), "line1\nline2");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod annotate;
pub mod api;
pub mod config;
pub mod html;
pub mod models;
pub mod render;
pub mod time;

// Re-export main types for convenience
pub use annotate::{AnnotatedStatus, StatusAnnotator};
pub use api::{ApiError, MastodonClient, Timeline};
pub use config::Config;
pub use html::{FlatNode, HtmlParser, LinkNode, Paragraph, TextNode};
pub use models::{Account, Notification, NotificationType, Status, Tag};
pub use render::{RenderOptions, plain_text, render};

/// ASCII logo for the application
pub const LOGO: &str = r"
 _      __     ____
| | /| / /__  / / /_ __
| |/ |/ / _ \/ / / // /
|__/|__/\___/_/_/\_, /
                /___/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
