//! Yahoo Finance client wrapper for company names, prices and dividends.
//!
//! Company names come from the public search endpoint; price and dividend
//! history go through `yahoo_finance_api`. Every call is bounded by the
//! configured timeout.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::dividends::DividendEvent;
use crate::metadata::{CompanyMetadata, MetadataFetcher, MetadataOutcome};
use crate::prices::PriceBar;

const DEFAULT_SEARCH_BASE_URL: &str = "https://query2.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Years of dividend history requested.
pub const DIVIDEND_HISTORY_YEARS: i64 = 5;

/// Errors from Yahoo Finance operations.
#[derive(Error, Debug)]
pub enum YahooError {
    #[error("Rate limited by Yahoo Finance (HTTP 429)")]
    RateLimited,
    #[error("Yahoo Finance request timed out")]
    Timeout,
    #[error("Yahoo Finance returned HTTP {0}")]
    HttpStatus(u16),
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    #[error("Symbol not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error(transparent)]
    Upstream(#[from] yahoo_finance_api::YahooError),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: String,
    #[serde(default)]
    longname: Option<String>,
    #[serde(default)]
    shortname: Option<String>,
}

/// Convert a unix timestamp in seconds to a UTC calendar date.
pub fn timestamp_to_date(timestamp: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

/// Start and end of the dividend history window ending at `now`.
pub fn dividend_window(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let start = now - time::Duration::days(365 * DIVIDEND_HISTORY_YEARS);
    (start, now)
}

/// Yahoo Finance client with a per-process metadata cache.
pub struct YahooClient {
    connector: yahoo_finance_api::YahooConnector,
    http: reqwest::Client,
    search_base_url: String,
    timeout: Duration,
    metadata_cache: Arc<DashMap<String, CompanyMetadata>>,
}

impl YahooClient {
    /// Create a client against the public Yahoo endpoints.
    pub fn new(timeout: Duration) -> Result<Self, YahooError> {
        Self::with_base_url(DEFAULT_SEARCH_BASE_URL, timeout)
    }

    /// Create a client whose name lookups go to `base_url` (used by tests).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, YahooError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            connector: yahoo_finance_api::YahooConnector::new()?,
            http,
            search_base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            metadata_cache: Arc::new(DashMap::new()),
        })
    }

    /// Look up the long and short company names for `code`.
    pub async fn get_company_metadata(&self, code: &str) -> Result<CompanyMetadata, YahooError> {
        let url = format!("{}/v1/finance/search", self.search_base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("q", code), ("quotesCount", "5"), ("newsCount", "0")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    YahooError::Timeout
                } else {
                    YahooError::Network(e)
                }
            })?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(YahooError::RateLimited);
        }
        if !status.is_success() {
            return Err(YahooError::HttpStatus(status.as_u16()));
        }

        let body = resp.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| YahooError::ParseFailed(e.to_string()))?;

        let quote = parsed
            .quotes
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(code))
            .ok_or_else(|| YahooError::NotFound(code.to_string()))?;

        Ok(CompanyMetadata {
            long_name: quote.longname.filter(|n| !n.trim().is_empty()),
            short_name: quote.shortname.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Daily (or coarser) bars for `code` over a named period such as `6mo`.
    pub async fn get_price_history(
        &self,
        code: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, YahooError> {
        let response = tokio::time::timeout(
            self.timeout,
            self.connector.get_quote_range(code, interval, period),
        )
        .await
        .map_err(|_| YahooError::Timeout)??;

        let quotes = response.quotes()?;
        let mut bars: Vec<PriceBar> = quotes
            .into_iter()
            .filter_map(|q| {
                let date = i64::try_from(q.timestamp).ok().and_then(timestamp_to_date)?;
                Some(PriceBar {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    /// Dividend payments for `code` over the last few years, oldest first.
    pub async fn get_dividends(&self, code: &str) -> Result<Vec<DividendEvent>, YahooError> {
        let (start, end) = dividend_window(OffsetDateTime::now_utc());
        let response = tokio::time::timeout(
            self.timeout,
            self.connector.get_quote_history(code, start, end),
        )
        .await
        .map_err(|_| YahooError::Timeout)??;

        let mut events: Vec<DividendEvent> = response
            .dividends()?
            .into_iter()
            .filter_map(|d| {
                let date = i64::try_from(d.date).ok().and_then(timestamp_to_date)?;
                Some(DividendEvent {
                    date,
                    amount: d.amount,
                })
            })
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    /// Get the number of cached metadata entries (for testing).
    pub fn cache_len(&self) -> usize {
        self.metadata_cache.len()
    }
}

impl MetadataFetcher for YahooClient {
    async fn fetch_metadata(&self, code: &str) -> MetadataOutcome {
        if let Some(hit) = self.metadata_cache.get(code) {
            return MetadataOutcome::Found(hit.value().clone());
        }
        match self.get_company_metadata(code).await {
            Ok(meta) => {
                self.metadata_cache.insert(code.to_string(), meta.clone());
                MetadataOutcome::Found(meta)
            }
            Err(e) => {
                tracing::warn!("Company metadata unavailable for {}: {}", code, e);
                MetadataOutcome::Unavailable(e.to_string())
            }
        }
    }
}
