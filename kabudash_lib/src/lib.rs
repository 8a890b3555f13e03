//! Library layer for kabudash: alias resolution, news relevance ranking,
//! and the price/dividend summaries shown on a single-stock dashboard.
//!
//! Network-facing pieces (company metadata, the news feed) sit behind the
//! [`MetadataFetcher`] and [`FeedSource`] traits and report failure as an
//! outcome value instead of an error.

pub mod alias_table;
pub mod aliases;
pub mod cache;
pub mod config;
pub mod dividends;
pub mod error;
pub mod feed;
pub mod metadata;
pub mod news;
pub mod normalize;
pub mod overrides;
pub mod prices;
pub mod ranking;
pub mod scoring;
pub mod validation;
pub mod yahoo;

pub use gnews_api;
pub use gnews_api::types;
pub use gnews_api::{Locale, NewsQuery};

pub use alias_table::{AliasEntry, AliasTable, AliasTableError, AliasTableStore};
pub use aliases::{collect_aliases, display_name_for, resolve_aliases};
pub use config::{Config, ConfigError, NewsConfig};
pub use dividends::{dividend_info, DividendEvent, DividendInfo, DividendMethod};
pub use error::KabudashError;
pub use feed::{FeedOutcome, FeedSource};
pub use metadata::{CompanyMetadata, MetadataFetcher, MetadataOutcome, NoMetadata};
pub use news::{fetch_news_for, fetch_news_with_aliases, NewsReport};
pub use overrides::{ManualOverrides, OverrideError};
pub use prices::{PriceBar, PriceSummary};
pub use ranking::{rank, NewsItem};
pub use scoring::{score_title, TitleScorer};
pub use yahoo::{YahooClient, YahooError};
