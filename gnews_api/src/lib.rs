//! Minimal client for the Google News RSS search feed.
//!
//! Builds exact-phrase search queries, fetches the feed and parses `<item>`
//! entries down to `{title, link, published}`.

mod client;
mod errors;
mod query;
mod rss;
pub mod types;
mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{build_feed_url, build_query, Locale, NewsQuery};
pub use self::rss::parse_feed;
