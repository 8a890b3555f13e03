//! Error types for the library layer.

use std::fmt;

use crate::alias_table::AliasTableError;
use crate::config::ConfigError;
use crate::overrides::OverrideError;

/// Errors surfaced to the caller by the library layer.
///
/// Upstream (metadata, feed, price) failures never appear here; those are
/// recovered where they happen.
#[derive(Debug)]
pub enum KabudashError {
    /// The alias table could not be read or was malformed.
    AliasTable(AliasTableError),
    /// The manual override table could not be loaded.
    Overrides(OverrideError),
    /// The configuration file could not be loaded.
    Config(ConfigError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for KabudashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AliasTable(e) => write!(f, "Alias table error: {}", e),
            Self::Overrides(e) => write!(f, "Override table error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for KabudashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AliasTable(e) => Some(e),
            Self::Overrides(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<AliasTableError> for KabudashError {
    fn from(e: AliasTableError) -> Self {
        Self::AliasTable(e)
    }
}

impl From<OverrideError> for KabudashError {
    fn from(e: OverrideError) -> Self {
        Self::Overrides(e)
    }
}

impl From<ConfigError> for KabudashError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_module_errors_convert_and_keep_source() {
        let err: KabudashError = AliasTableError::MissingColumn("alias").into();
        assert!(matches!(err, KabudashError::AliasTable(_)));
        assert!(err.to_string().contains("missing required column 'alias'"));
        assert!(err.source().is_some());

        let err: KabudashError = OverrideError::DuplicateTicker("7611.T".to_string()).into();
        assert!(err.to_string().starts_with("Override table error"));
        assert!(err.source().is_some());

        let err: KabudashError = ConfigError::Invalid("news.max_items must be at least 1".into()).into();
        assert!(matches!(err, KabudashError::Config(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_input_has_no_source() {
        let err = KabudashError::InvalidInput("code must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: code must not be empty");
        assert!(err.source().is_none());
    }
}
