//! The news pipeline: aliases, query, feed, scoring, ranking.

use std::collections::BTreeSet;

use gnews_api::types::FeedEntry;
use gnews_api::NewsQuery;
use serde::Serialize;

use crate::alias_table::AliasTable;
use crate::config::NewsConfig;
use crate::feed::{FeedOutcome, FeedSource};
use crate::metadata::MetadataFetcher;
use crate::normalize::normalize;
use crate::overrides::ManualOverrides;
use crate::ranking::{rank, NewsItem};
use crate::scoring::TitleScorer;

/// Everything one news run produced, for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct NewsReport {
    pub code: String,
    pub aliases: Vec<String>,
    pub query: String,
    /// Raw entries received from the feed before filtering.
    pub fetched: usize,
    pub items: Vec<NewsItem>,
    /// Why the feed returned nothing, when it failed.
    pub feed_error: Option<String>,
}

/// Search query for an alias set under the given settings.
pub fn build_news_query(aliases: &BTreeSet<String>, settings: &NewsConfig) -> NewsQuery {
    NewsQuery::default()
        .with_phrases(aliases)
        .with_must_have(&settings.must_have_terms)
        .with_exclude(&settings.query_exclude_terms)
        .with_recency_days(settings.recency_days)
}

/// Scores raw entries and ranks them. Only the first
/// [`NewsConfig::fetch_limit`] entries are considered; untitled entries are
/// skipped.
pub fn rank_entries(
    entries: Vec<FeedEntry>,
    aliases: &BTreeSet<String>,
    code: &str,
    settings: &NewsConfig,
) -> Vec<NewsItem> {
    let scorer = TitleScorer::new(aliases, code);
    let candidates = entries
        .into_iter()
        .take(settings.fetch_limit())
        .filter(|e| !e.title.trim().is_empty())
        .map(|e| NewsItem {
            score: scorer.score(&e.title),
            title: e.title,
            link: e.link,
            published: e.published,
        })
        .collect();

    rank(
        candidates,
        &settings.title_exclude_terms,
        settings.strict,
        settings.min_score,
        settings.max_items,
    )
}

/// Runs the pipeline with an already-resolved alias set.
pub async fn fetch_news_with_aliases<S: FeedSource>(
    code: &str,
    aliases: BTreeSet<String>,
    feed: &S,
    settings: &NewsConfig,
) -> NewsReport {
    let code = normalize(code);
    let query = build_news_query(&aliases, settings);
    let query_string = query.to_query_string();
    tracing::debug!("News query for {}: {}", code, query_string);

    let (entries, feed_error) = match feed.fetch_entries(&query, settings.fetch_limit()).await {
        FeedOutcome::Entries(entries) => (entries, None),
        FeedOutcome::Unavailable(reason) => (Vec::new(), Some(reason)),
    };
    let fetched = entries.len();
    let items = rank_entries(entries, &aliases, &code, settings);
    tracing::info!(
        "News for {}: {} fetched, {} kept ({} aliases)",
        code,
        fetched,
        items.len(),
        aliases.len()
    );

    NewsReport {
        code,
        aliases: aliases.into_iter().collect(),
        query: query_string,
        fetched,
        items,
        feed_error,
    }
}

/// Resolves aliases for `code` and runs the full news pipeline.
///
/// Neither the metadata lookup nor the feed can fail this call; both degrade
/// to less data.
pub async fn fetch_news_for<M, S>(
    code: &str,
    table: Option<&AliasTable>,
    overrides: &ManualOverrides,
    metadata: &M,
    feed: &S,
    settings: &NewsConfig,
) -> NewsReport
where
    M: MetadataFetcher,
    S: FeedSource,
{
    let aliases = crate::aliases::resolve_aliases(code, table, overrides, metadata).await;
    fetch_news_with_aliases(code, aliases, feed, settings).await
}
