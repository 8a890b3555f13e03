//! Search query construction: the [`NewsQuery`] builder, the free
//! [`build_query`] / [`build_feed_url`] functions and the feed [`Locale`].

use std::collections::BTreeSet;

use url::Url;

/// Language/country triple sent with every feed request (`hl`, `gl`, `ceid`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Interface language, e.g. `ja`.
    pub language: String,
    /// Country edition, e.g. `JP`.
    pub country: String,
    /// Content edition id, e.g. `JP:ja`.
    pub content_language: String,
}

impl Locale {
    /// The Japanese edition of the feed.
    pub fn japan() -> Self {
        Self {
            language: "ja".to_string(),
            country: "JP".to_string(),
            content_language: "JP:ja".to_string(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::japan()
    }
}

/// Builds a free-text search query of the form
/// `("p1" OR "p2") (m1 OR m2) -x1 -x2 when:Nd`.
///
/// Each phrase is quoted as an exact-phrase term and the phrases are
/// OR-combined. Must-have terms form a second OR group that is conjoined by
/// juxtaposition. Exclusion terms are negated one by one. Empty groups are
/// left out entirely.
pub fn build_query(
    phrases: &[impl AsRef<str>],
    must_have: &[impl AsRef<str>],
    exclude: &[impl AsRef<str>],
    recency_days: Option<u32>,
) -> String {
    let mut parts = Vec::new();

    let quoted: Vec<String> = phrases
        .iter()
        .filter_map(|p| quote_phrase(p.as_ref()))
        .collect();
    if !quoted.is_empty() {
        parts.push(format!("({})", quoted.join(" OR ")));
    }

    let required: Vec<&str> = must_have
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !required.is_empty() {
        parts.push(format!("({})", required.join(" OR ")));
    }

    for term in exclude {
        let term = term.as_ref().trim();
        if !term.is_empty() {
            parts.push(format!("-{}", term));
        }
    }

    if let Some(days) = recency_days {
        parts.push(format!("when:{}d", days));
    }

    parts.join(" ")
}

/// Appends the query and locale parameters to the feed search URL.
pub fn build_feed_url(base: &Url, query: &str, locale: &Locale) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("hl", &locale.language)
        .append_pair("gl", &locale.country)
        .append_pair("ceid", &locale.content_language);
    url
}

/// Quote marks inside a phrase would end the exact-phrase term early, so
/// they are dropped.
fn quote_phrase(phrase: &str) -> Option<String> {
    let cleaned: String = phrase.chars().filter(|c| *c != '"').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(format!("\"{}\"", cleaned))
    }
}

/// Builder for a news search.
///
/// Phrases are kept in a sorted set so the same alias set always yields the
/// same query string.
#[derive(Debug, Clone, Default)]
pub struct NewsQuery {
    phrases: BTreeSet<String>,
    must_have: Vec<String>,
    exclude: Vec<String>,
    recency_days: Option<u32>,
}

impl NewsQuery {
    /// Adds one exact-phrase term.
    pub fn with_phrase(mut self, phrase: &str) -> Self {
        self.phrases.insert(phrase.to_string());
        self
    }

    /// Adds several exact-phrase terms.
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.phrases
            .extend(phrases.into_iter().map(|p| p.as_ref().to_string()));
        self
    }

    /// Sets the topical terms of which at least one must appear.
    pub fn with_must_have<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.must_have = terms.into_iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    /// Sets the negated terms.
    pub fn with_exclude<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = terms.into_iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    /// Restricts results to the last `days` days.
    pub fn with_recency_days(mut self, days: u32) -> Self {
        self.recency_days = Some(days);
        self
    }

    /// The exact-phrase terms in query order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// Renders the free-text query string.
    pub fn to_query_string(&self) -> String {
        let phrases: Vec<&String> = self.phrases.iter().collect();
        build_query(
            phrases.as_slice(),
            self.must_have.as_slice(),
            self.exclude.as_slice(),
            self.recency_days,
        )
    }

    /// Appends this query and the locale parameters to the given URL.
    pub fn add_to_url(&self, url: &Url, locale: &Locale) -> Url {
        build_feed_url(url, &self.to_query_string(), locale)
    }
}
