//! Company metadata capability used by alias resolution and display names.

use serde::{Deserialize, Serialize};

/// Names reported by a live metadata source. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMetadata {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

impl CompanyMetadata {
    /// Non-empty names, long name first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [self.long_name.as_deref(), self.short_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|n| !n.trim().is_empty())
    }

    /// The preferred human-readable name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.names().next()
    }
}

/// Result of a best-effort metadata lookup.
///
/// A lookup never fails outright: network errors, timeouts, unknown symbols
/// and disabled lookups all become `Unavailable` with a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Found(CompanyMetadata),
    Unavailable(String),
}

impl MetadataOutcome {
    pub fn metadata(&self) -> Option<&CompanyMetadata> {
        match self {
            Self::Found(m) => Some(m),
            Self::Unavailable(_) => None,
        }
    }

    pub fn into_metadata(self) -> Option<CompanyMetadata> {
        match self {
            Self::Found(m) => Some(m),
            Self::Unavailable(_) => None,
        }
    }
}

/// Anything that can look up company names for a ticker code.
#[allow(async_fn_in_trait)]
pub trait MetadataFetcher {
    async fn fetch_metadata(&self, code: &str) -> MetadataOutcome;
}

/// Fetcher used when live lookups are switched off.
pub struct NoMetadata;

impl MetadataFetcher for NoMetadata {
    async fn fetch_metadata(&self, _code: &str) -> MetadataOutcome {
        MetadataOutcome::Unavailable("metadata lookup disabled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_skip_missing_and_blank() {
        let meta = CompanyMetadata {
            long_name: Some("  ".to_string()),
            short_name: Some("HIDAY HIDAKA CORP".to_string()),
        };
        assert_eq!(meta.names().collect::<Vec<_>>(), vec!["HIDAY HIDAKA CORP"]);
        assert_eq!(meta.display_name(), Some("HIDAY HIDAKA CORP"));
    }

    #[test]
    fn display_name_prefers_long_name() {
        let meta = CompanyMetadata {
            long_name: Some("Hiday Hidaka Corp.".to_string()),
            short_name: Some("HIDAY HIDAKA CORP".to_string()),
        };
        assert_eq!(meta.display_name(), Some("Hiday Hidaka Corp."));
    }

    #[test]
    fn empty_metadata_has_no_name() {
        assert_eq!(CompanyMetadata::default().display_name(), None);
    }

    #[tokio::test]
    async fn no_metadata_is_unavailable() {
        let outcome = NoMetadata.fetch_metadata("7611.T").await;
        assert!(outcome.metadata().is_none());
        assert!(matches!(outcome, MetadataOutcome::Unavailable(_)));
    }
}
