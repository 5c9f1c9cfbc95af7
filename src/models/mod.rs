//! Data models for Mastodon entities

mod account;
mod notification;
mod status;
mod tag;

pub use account::Account;
pub use notification::{Notification, NotificationType};
pub use status::{MediaAttachment, MediaType, Status};
pub use tag::{Tag, TagHistory};
