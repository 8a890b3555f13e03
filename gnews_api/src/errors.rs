//! Error types for the feed client.

/// Errors that can occur when fetching or parsing the news feed.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unexpected response).
    #[error("Request failed")]
    RequestFailed,
    /// The feed endpoint returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not a readable RSS document.
    #[error("Invalid feed: {0}")]
    InvalidFeed(String),
}
