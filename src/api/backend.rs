//! Remote media API trait and shared types.
//!
//! The [`MediaApi`] trait is the only thing the fetcher knows about the
//! provider: list the folders, and run one page of a search. The production
//! implementation is [`CloudinaryApi`](super::cloudinary::CloudinaryApi).

use crate::types::RawAsset;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected API response: {0}")]
    Decode(String),
}

/// Fragments of provider messages that mean the credentials are wrong or
/// absent. Compared case-insensitively.
const CREDENTIAL_HINTS: &[&str] = &[
    "api_key",
    "api key",
    "api_secret",
    "api secret",
    "credential",
    "must supply",
    "unknown api",
    "invalid signature",
];

impl ApiError {
    /// Whether this failure is best fixed by checking the credentials.
    ///
    /// True for HTTP 401 and 403, and for any error whose message mentions
    /// the API key, secret, or credentials.
    pub fn is_credential_problem(&self) -> bool {
        let message = match self {
            ApiError::Status { status: 401 | 403, .. } => return true,
            ApiError::Status { message, .. } => message,
            ApiError::Transport(message) | ApiError::Decode(message) => message,
        };
        let lowered = message.to_ascii_lowercase();
        CREDENTIAL_HINTS.iter().any(|hint| lowered.contains(hint))
    }
}

/// One search call: a folder-scoped expression plus an optional cursor.
///
/// Results are always sorted by creation time, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub expression: String,
    pub max_results: u32,
    pub next_cursor: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub resources: Vec<RawAsset>,
    /// `None` on the last page.
    pub next_cursor: Option<String>,
}

/// The two remote calls the fetcher needs.
pub trait MediaApi {
    /// List folder keys, in the provider's order.
    fn list_folders(&self) -> Result<Vec<String>, ApiError>;

    /// Fetch one page of assets matching a search expression.
    fn search_page(&self, request: &SearchRequest) -> Result<SearchPage, ApiError>;
}
