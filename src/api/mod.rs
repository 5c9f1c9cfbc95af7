//! Mastodon REST API client

mod error;
pub mod mastodon;

pub use error::{ApiError, LOADING_ERROR_HEADLINE};
pub use mastodon::{MastodonClient, SearchKind, SearchResults, search_endpoint};

use std::fmt;
use std::str::FromStr;

/// The timelines a client can browse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeline {
    /// Accounts the user follows
    Home,
    /// This instance only
    Local,
    /// Everything the instance knows about
    #[default]
    Public,
}

impl Timeline {
    /// Lowercase name, as used in config and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Local => "local",
            Self::Public => "public",
        }
    }

    /// Whether fetching this timeline needs an access token
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::Home)
    }

    /// Endpoint path (below `/api`) for this timeline
    pub fn endpoint(self, limit: usize) -> String {
        match self {
            Self::Home => format!("/v1/timelines/home?limit={limit}"),
            Self::Local => format!("/v1/timelines/public?local=true&limit={limit}"),
            Self::Public => format!("/v1/timelines/public?limit={limit}"),
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Timeline {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "local" => Ok(Self::Local),
            "public" | "global" | "federated" => Ok(Self::Public),
            other => Err(anyhow::anyhow!(
                "Unknown timeline: {other} (expected home, local or public)"
            )),
        }
    }
}
