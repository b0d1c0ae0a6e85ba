//! Error types shared by the registry client and the archive downloader

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message shown when a failure carries nothing more specific
pub const GENERIC_FAILURE: &str = "request failed";

/// Failure talking to the registry or fetching a template archive
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote answered with a non-success status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid registry url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to unpack template archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive entry escapes the destination: {0}")]
    UnsafeEntry(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// Build an API error from a response status and its raw body
    ///
    /// Registries answer failures with `{"message": "..."}`. Anything else
    /// (HTML, plain text, empty body) falls back to a generic message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Api {
            status,
            message: api_message(status, body),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

fn api_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("{} (HTTP {})", GENERIC_FAILURE, status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_taken_from_json_body() {
        let err = FetchError::from_response(
            StatusCode::FORBIDDEN,
            r#"{"message":"API rate limit exceeded for 1.2.3.4.","documentation_url":"https://docs.github.com"}"#,
        );
        assert_eq!(err.to_string(), "API rate limit exceeded for 1.2.3.4.");
    }

    #[test]
    fn test_missing_message_falls_back() {
        let err = FetchError::from_response(StatusCode::NOT_FOUND, r#"{"error":"nope"}"#);
        assert_eq!(err.to_string(), "request failed (HTTP 404)");
    }

    #[test]
    fn test_non_json_body_falls_back() {
        let err = FetchError::from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "request failed (HTTP 502)");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = FetchError::from_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"  "}"#);
        assert_eq!(err.to_string(), "request failed (HTTP 500)");
    }
}
