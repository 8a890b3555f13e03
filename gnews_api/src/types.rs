//! Records produced by the feed parser.

use serde::{Deserialize, Serialize};

/// One `<item>` of an RSS feed, reduced to the fields the ranking needs.
///
/// `published` is kept as the raw `pubDate` text. It is only ever compared
/// as a string, never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: String,
}
