//! Account model

use serde::{Deserialize, Serialize};

/// A Mastodon account, as embedded in statuses and notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Server-side account ID
    pub id: String,
    /// Local username
    pub username: String,
    /// `username` for local accounts, `username@domain` for remote ones
    #[serde(default)]
    pub acct: String,
    /// Display name (may be empty)
    #[serde(default)]
    pub display_name: String,
    /// Profile page URL
    #[serde(default)]
    pub url: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: String,
}

impl Account {
    /// Display name, or the account handle when no display name is set
    pub fn display_name_or_acct(&self) -> &str {
        if self.display_name.trim().is_empty() {
            self.handle()
        } else {
            &self.display_name
        }
    }

    /// `acct`, falling back to the bare username
    pub fn handle(&self) -> &str {
        if self.acct.is_empty() {
            &self.username
        } else {
            &self.acct
        }
    }

    /// Handle with instance domain, e.g. `@alice@mastodon.social`
    pub fn full_handle(&self, instance: &str) -> String {
        if self.acct.contains('@') {
            format!("@{}", self.acct)
        } else {
            let domain = instance
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            format!("@{}@{}", self.handle(), domain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(display_name: &str, acct: &str) -> Account {
        Account {
            id: "1".to_string(),
            username: "alice".to_string(),
            acct: acct.to_string(),
            display_name: display_name.to_string(),
            url: String::new(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_display_name_or_acct() {
        assert_eq!(account("Alice", "alice").display_name_or_acct(), "Alice");
        assert_eq!(account("  ", "alice@example.org").display_name_or_acct(), "alice@example.org");
        assert_eq!(account("", "").display_name_or_acct(), "alice");
    }

    #[test]
    fn test_full_handle() {
        assert_eq!(
            account("", "alice").full_handle("https://mastodon.social/"),
            "@alice@mastodon.social"
        );
        assert_eq!(
            account("", "alice@example.org").full_handle("https://mastodon.social"),
            "@alice@example.org"
        );
    }
}
