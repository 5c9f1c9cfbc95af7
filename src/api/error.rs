//! Errors returned by the Mastodon API client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Headline shown above any loading error
pub const LOADING_ERROR_HEADLINE: &str = "An error happened while loading.";

/// Errors from the Mastodon API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a Mastodon error entity
    #[error("Mastodon error {status}: {error}")]
    Mastodon {
        /// HTTP status
        status: StatusCode,
        /// Error message
        error: String,
        /// Longer description, when the server provides one
        description: Option<String>,
    },

    /// The server answered with a non-success status and no error entity
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// A successful response did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The endpoint requires an access token and none is configured
    #[error("this endpoint requires an access token")]
    MissingToken,
}

/// Error entity returned by Mastodon on failure
#[derive(Debug, Deserialize)]
struct ErrorEntity {
    error: String,
    error_description: Option<String>,
}

impl ApiError {
    /// Build an error from a non-success response body
    pub fn from_response(status: StatusCode, body: String) -> Self {
        match serde_json::from_str::<ErrorEntity>(&body) {
            Ok(entity) => Self::Mastodon {
                status,
                error: entity.error,
                description: entity.error_description,
            },
            Err(_) => Self::Status { status, body },
        }
    }

    /// Lines to show the user: a headline, then whatever detail is known
    pub fn user_message(&self) -> Vec<String> {
        let mut lines = vec![LOADING_ERROR_HEADLINE.to_string()];
        match self {
            Self::Mastodon {
                error, description, ..
            } => {
                lines.push(error.clone());
                lines.extend(description.clone());
            }
            other => lines.push(other.to_string()),
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mastodon_error_entity() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"invalid_grant","error_description":"The access token is invalid"}"#
                .to_string(),
        );
        assert!(matches!(err, ApiError::Mastodon { .. }));
        assert_eq!(
            err.user_message(),
            [
                LOADING_ERROR_HEADLINE,
                "invalid_grant",
                "The access token is invalid"
            ]
        );
    }

    #[test]
    fn test_plain_body() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(matches!(err, ApiError::Status { .. }));
        let lines = err.user_message();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("upstream down"));
    }

    #[test]
    fn test_missing_token_message() {
        assert_eq!(
            ApiError::MissingToken.user_message()[1],
            "this endpoint requires an access token"
        );
    }
}
