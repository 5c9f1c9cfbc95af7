//! Status model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Account;

/// A status (post), as returned by the Mastodon API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Server-side status ID
    pub id: String,
    /// When the status was created
    pub created_at: DateTime<Utc>,
    /// Body as HTML
    #[serde(default)]
    pub content: String,
    /// Content warning (empty when none)
    #[serde(default)]
    pub spoiler_text: String,
    /// URL to the status on the web
    pub url: Option<String>,
    /// Author
    pub account: Account,
    /// The boosted status, if this is a boost
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
    /// Number of replies
    #[serde(default)]
    pub replies_count: u32,
    /// Number of boosts
    #[serde(default)]
    pub reblogs_count: u32,
    /// Number of favourites
    #[serde(default)]
    pub favourites_count: u32,
    /// Whether the current user favourited this status
    #[serde(default)]
    pub favourited: Option<bool>,
    /// Whether the current user boosted this status
    #[serde(default)]
    pub reblogged: Option<bool>,
    /// Whether the current user bookmarked this status
    #[serde(default)]
    pub bookmarked: Option<bool>,
    /// ID of the status this one replies to
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
    /// Media attachments
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
}

/// Media attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Attachment ID
    pub id: String,
    /// Media type
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Media URL
    pub url: String,
    /// Preview/thumbnail URL
    pub preview_url: Option<String>,
    /// Alt text
    pub description: Option<String>,
}

/// Media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Image (JPEG, PNG, GIF, WebP)
    Image,
    /// Video (MP4, WebM)
    Video,
    /// Looping silent video
    Gifv,
    /// Audio file
    Audio,
    /// Unknown or unsupported media type
    #[serde(other)]
    Unknown,
}

impl Status {
    /// The status whose content should be shown: the boosted one for a boost
    pub fn displayed(&self) -> &Status {
        self.reblog.as_deref().unwrap_or(self)
    }

    /// Whether this status is a boost of another one
    pub const fn is_reblog(&self) -> bool {
        self.reblog.is_some()
    }

    /// Whether the status carries a content warning
    pub fn has_spoiler(&self) -> bool {
        !self.spoiler_text.trim().is_empty()
    }
}
