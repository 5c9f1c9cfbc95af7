//! Trending hashtag model

use serde::{Deserialize, Serialize};

/// A hashtag, with usage history when returned from the trends endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Hashtag name, without the leading `#`
    pub name: String,
    /// Hashtag page URL
    #[serde(default)]
    pub url: String,
    /// Daily usage, most recent day first
    #[serde(default)]
    pub history: Vec<TagHistory>,
}

/// One day of hashtag usage (the API encodes numbers as strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHistory {
    /// UNIX timestamp of the day
    pub day: String,
    /// Number of statuses using the tag
    pub uses: String,
    /// Number of distinct accounts using the tag
    pub accounts: String,
}

impl Tag {
    /// Uses on the most recent day, 0 when unknown
    pub fn uses_today(&self) -> u64 {
        self.history
            .first()
            .and_then(|h| h.uses.parse().ok())
            .unwrap_or(0)
    }

    /// Distinct accounts on the most recent day, 0 when unknown
    pub fn accounts_today(&self) -> u64 {
        self.history
            .first()
            .and_then(|h| h.accounts.parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_today() {
        let json = r#"{"name": "rust", "url": "https://m.s/tags/rust",
            "history": [{"day": "1709251200", "uses": "42", "accounts": "17"},
                        {"day": "1709164800", "uses": "30", "accounts": "10"}]}"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.uses_today(), 42);
        assert_eq!(tag.accounts_today(), 17);

        let bare: Tag = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(bare.uses_today(), 0);
    }
}
