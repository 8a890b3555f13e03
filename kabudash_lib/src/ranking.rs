//! Exclusion filtering and ordering of scored headlines.

use serde::Serialize;

use crate::normalize::fold;

/// A scored headline ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Publication timestamp exactly as the feed reported it.
    pub published: String,
    pub score: u32,
}

/// Filters and orders scored candidates.
///
/// Titles containing any exclude term (case- and width-insensitive) are
/// dropped first; with `strict` set, so is anything scoring below
/// `min_score`. The rest is sorted by score, then by the raw `published`
/// string, both descending, and cut to `max_items`.
pub fn rank(
    candidates: Vec<NewsItem>,
    exclude_terms: &[String],
    strict: bool,
    min_score: u32,
    max_items: usize,
) -> Vec<NewsItem> {
    let excludes: Vec<String> = exclude_terms
        .iter()
        .map(|t| fold(t))
        .filter(|t| !t.is_empty())
        .collect();

    let mut kept: Vec<NewsItem> = candidates
        .into_iter()
        .filter(|item| {
            let title = fold(&item.title);
            !excludes.iter().any(|term| title.contains(term.as_str()))
        })
        .filter(|item| !strict || item.score >= min_score)
        .collect();

    kept.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.published.cmp(&a.published))
    });
    kept.truncate(max_items);
    kept
}
