//! Mastodon API client

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{Account, Notification, Status, Tag};

use super::{ApiError, Timeline};

/// Mastodon API client
pub struct MastodonClient {
    client: Client,
    instance: String,
    access_token: Option<String>,
}

/// Result of a v2 search
#[derive(Debug, Default, Deserialize)]
pub struct SearchResults {
    /// Matching accounts
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Matching statuses
    #[serde(default)]
    pub statuses: Vec<Status>,
    /// Matching hashtags
    #[serde(default)]
    pub hashtags: Vec<Tag>,
}

/// What a search should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Accounts only
    Accounts,
    /// Statuses only
    Statuses,
    /// Hashtags only
    Hashtags,
}

impl SearchKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Statuses => "statuses",
            Self::Hashtags => "hashtags",
        }
    }
}

/// Normalize an instance string to a base URL (scheme added, no trailing `/`)
pub fn instance_url(instance: &str) -> String {
    let instance = instance.trim().trim_end_matches('/');
    if instance.starts_with("http://") || instance.starts_with("https://") {
        instance.to_string()
    } else {
        format!("https://{instance}")
    }
}

impl MastodonClient {
    /// Create a new Mastodon client
    pub fn new(instance: &str, access_token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            instance: instance_url(instance),
            access_token: access_token
                .filter(|t| !t.is_empty())
                .map(ToString::to_string),
        }
    }

    /// Base URL of the instance
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Whether requests carry an access token
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api{}", self.instance, endpoint)
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        let url = self.api_url(endpoint);
        tracing::debug!("GET {url}");

        let request = self.client.get(&url);
        match &self.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.access_token.is_some() {
            Ok(())
        } else {
            Err(ApiError::MissingToken)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.get(endpoint).send().await?;
        decode(response).await
    }

    /// Timelines the user follows
    pub async fn home_timeline(&self, limit: usize) -> Result<Vec<Status>, ApiError> {
        self.timeline(Timeline::Home, limit).await
    }

    /// Federated timeline
    pub async fn public_timeline(&self, limit: usize) -> Result<Vec<Status>, ApiError> {
        self.timeline(Timeline::Public, limit).await
    }

    /// Statuses from this instance only
    pub async fn local_timeline(&self, limit: usize) -> Result<Vec<Status>, ApiError> {
        self.timeline(Timeline::Local, limit).await
    }

    /// Fetch any of the timelines
    pub async fn timeline(
        &self,
        timeline: Timeline,
        limit: usize,
    ) -> Result<Vec<Status>, ApiError> {
        if timeline.requires_auth() {
            self.require_token()?;
        }
        self.fetch(&timeline.endpoint(limit)).await
    }

    /// Statuses the user bookmarked
    pub async fn bookmarks(&self, limit: usize) -> Result<Vec<Status>, ApiError> {
        self.require_token()?;
        self.fetch(&format!("/v1/bookmarks?limit={limit}")).await
    }

    /// Notifications, optionally restricted to mentions
    pub async fn notifications(
        &self,
        limit: usize,
        only_mentions: bool,
    ) -> Result<Vec<Notification>, ApiError> {
        self.require_token()?;
        let mut endpoint = format!("/v1/notifications?limit={limit}");
        if only_mentions {
            endpoint.push_str("&types[]=mention");
        }
        self.fetch(&endpoint).await
    }

    /// Hashtags trending on the instance
    pub async fn trending_tags(&self, limit: usize) -> Result<Vec<Tag>, ApiError> {
        self.fetch(&format!("/v1/trends/tags?limit={limit}")).await
    }

    /// Search the instance
    pub async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: usize,
    ) -> Result<SearchResults, ApiError> {
        self.fetch(&search_endpoint(query, kind, limit)).await
    }

    /// Search statuses
    pub async fn search_statuses(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Status>, ApiError> {
        Ok(self.search(query, SearchKind::Statuses, limit).await?.statuses)
    }

    /// Search accounts
    pub async fn search_accounts(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Account>, ApiError> {
        Ok(self.search(query, SearchKind::Accounts, limit).await?.accounts)
    }

    /// Search hashtags
    pub async fn search_hashtags(&self, query: &str, limit: usize) -> Result<Vec<Tag>, ApiError> {
        Ok(self.search(query, SearchKind::Hashtags, limit).await?.hashtags)
    }
}

/// Endpoint path (below `/api`) for a v2 search
pub fn search_endpoint(query: &str, kind: SearchKind, limit: usize) -> String {
    format!(
        "/v2/search?q={}&type={}&limit={limit}",
        urlencoding::encode(query),
        kind.as_str()
    )
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!("Mastodon returned {status}");
        return Err(ApiError::from_response(status, body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_url() {
        assert_eq!(instance_url("mastodon.social"), "https://mastodon.social");
        assert_eq!(instance_url("https://mastodon.social/"), "https://mastodon.social");
        assert_eq!(instance_url(" http://localhost:3000 "), "http://localhost:3000");
    }

    #[test]
    fn test_api_url() {
        let client = MastodonClient::new("fosstodon.org", None);
        assert_eq!(
            client.api_url("/v1/timelines/public"),
            "https://fosstodon.org/api/v1/timelines/public"
        );
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_no_token() {
        assert!(!MastodonClient::new("m.s", Some("")).is_authenticated());
        assert!(MastodonClient::new("m.s", Some("abc")).is_authenticated());
    }

    #[test]
    fn test_timeline_endpoints() {
        assert_eq!(Timeline::Home.endpoint(3), "/v1/timelines/home?limit=3");
        assert_eq!(Timeline::Public.endpoint(3), "/v1/timelines/public?limit=3");
        assert_eq!(
            Timeline::Local.endpoint(3),
            "/v1/timelines/public?local=true&limit=3"
        );
    }

    #[test]
    fn test_authenticated_endpoints_need_token() {
        let client = MastodonClient::new("mastodon.invalid", None);

        let err = tokio_test::block_on(client.home_timeline(5)).unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        let err = tokio_test::block_on(client.bookmarks(5)).unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        let err = tokio_test::block_on(client.notifications(5, true)).unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[test]
    fn test_search_endpoint_encodes_query() {
        assert_eq!(
            search_endpoint("#rust lang", SearchKind::Hashtags, 5),
            "/v2/search?q=%23rust%20lang&type=hashtags&limit=5"
        );
        assert_eq!(
            search_endpoint("a&type=accounts", SearchKind::Statuses, 20),
            "/v2/search?q=a%26type%3Daccounts&type=statuses&limit=20"
        );
        assert_eq!(
            search_endpoint("bob", SearchKind::Accounts, 1),
            "/v2/search?q=bob&type=accounts&limit=1"
        );
    }

    #[test]
    fn test_search_results_decode() {
        let json = r#"{"accounts": [], "statuses": [],
            "hashtags": [{"name": "rust", "url": "https://m.s/tags/rust", "history": []}]}"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.hashtags[0].name, "rust");
        assert!(results.statuses.is_empty());
    }
}
