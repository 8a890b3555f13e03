//! HTTP client for the Google News RSS search endpoint.

use std::time::Duration;

use url::Url;

use crate::{
    query::{Locale, NewsQuery},
    rss::parse_feed,
    types::FeedEntry,
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_BASE_URL: &str = "https://news.google.com";
const SEARCH_PATH: &str = "/rss/search";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the news search feed.
///
/// Each request builds a fresh `reqwest::Client` with a randomized browser
/// user agent and the configured timeout.
pub struct Client {
    /// Base URL for the feed. Defaults to `https://news.google.com`.
    base_url: String,
    locale: Locale,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client pointing at the production feed with the Japanese locale.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: Locale::japan(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new()
        }
    }

    /// Replaces the locale sent with every request.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Replaces the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the full feed URL for the given query.
    pub fn search_url(&self, query: &NewsQuery) -> Result<Url, Error> {
        let base = Url::parse(format!("{}{}", &self.base_url, SEARCH_PATH).as_str()).map_err(
            |e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            },
        )?;
        Ok(query.add_to_url(&base, &self.locale))
    }

    /// Fetches the feed for `query` and returns at most `limit` entries in
    /// feed order.
    pub async fn search(&self, query: &NewsQuery, limit: usize) -> Result<Vec<FeedEntry>, Error> {
        let url = self.search_url(query)?;
        tracing::debug!("Fetching news feed: {}", url);

        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/rss+xml, application/xml;q=0.9, */*;q=0.8")
            .header(
                "accept-language",
                format!("{},en;q=0.5", self.locale.language),
            )
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get feed: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Feed request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let mut entries = parse_feed(&body)?;
        entries.truncate(limit);
        Ok(entries)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
