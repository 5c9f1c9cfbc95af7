//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, Status};

/// A notification for the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID
    pub id: String,
    /// What happened
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// When it happened
    pub created_at: DateTime<Utc>,
    /// Who triggered it
    pub account: Account,
    /// The status involved, for mentions, boosts, favourites and polls
    #[serde(default)]
    pub status: Option<Status>,
}

/// Notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone mentioned you
    Mention,
    /// Someone boosted one of your statuses
    Reblog,
    /// Someone favourited one of your statuses
    Favourite,
    /// Someone followed you
    Follow,
    /// Someone requested to follow you
    FollowRequest,
    /// A poll you voted in or created has ended
    Poll,
    /// Someone you enabled notifications for has posted
    Status,
    /// Anything newer than this client knows about
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Verb phrase describing the notification, following the actor's name
    pub const fn description(self) -> &'static str {
        match self {
            Self::Mention => "mentioned you",
            Self::Reblog => "boosted your status",
            Self::Favourite => "favourited your status",
            Self::Follow => "followed you",
            Self::FollowRequest => "requested to follow you",
            Self::Poll => "'s poll has ended",
            Self::Status => "just posted",
            Self::Unknown => "did something",
        }
    }
}

impl Notification {
    /// One-line header, e.g. "Alice boosted your status"
    pub fn header(&self) -> String {
        let name = self.account.display_name_or_acct();
        match self.kind {
            NotificationType::Poll => format!("{name}{}", self.kind.description()),
            kind => format!("{name} {}", kind.description()),
        }
    }
}
