//! Best-effort boundary around the news feed client.

use gnews_api::types::FeedEntry;
use gnews_api::{Client, NewsQuery};

/// Result of a best-effort feed fetch. Failures carry a reason and are
/// treated downstream as an empty feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    Entries(Vec<FeedEntry>),
    Unavailable(String),
}

impl FeedOutcome {
    /// The entries, or nothing when the feed was unavailable.
    pub fn into_entries(self) -> Vec<FeedEntry> {
        match self {
            Self::Entries(entries) => entries,
            Self::Unavailable(_) => Vec::new(),
        }
    }
}

/// Anything that can answer a news search with raw feed entries.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn fetch_entries(&self, query: &NewsQuery, limit: usize) -> FeedOutcome;
}

impl FeedSource for Client {
    async fn fetch_entries(&self, query: &NewsQuery, limit: usize) -> FeedOutcome {
        match self.search(query, limit).await {
            Ok(entries) => FeedOutcome::Entries(entries),
            Err(e) => {
                tracing::warn!("News feed unavailable: {}", e);
                FeedOutcome::Unavailable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_empty() {
        let outcome = FeedOutcome::Unavailable("timeout".to_string());
        assert!(outcome.into_entries().is_empty());
    }

    #[tokio::test]
    async fn client_failure_becomes_unavailable() {
        let client = Client::with_base_url("http://127.0.0.1:9");
        let outcome = client
            .fetch_entries(&NewsQuery::default().with_phrase("日高屋"), 10)
            .await;
        assert!(matches!(outcome, FeedOutcome::Unavailable(_)));
    }
}
