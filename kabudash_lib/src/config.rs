//! Runtime configuration, read from a TOML file.
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) yields the stock Japanese-market setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gnews_api::Locale;
use serde::Deserialize;
use thiserror::Error;

/// Error types for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(String),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Topical terms of which at least one must appear in a matching article.
pub const DEFAULT_MUST_HAVE_TERMS: &[&str] =
    &["株価", "決算", "IR", "業績", "出店", "既存店", "月次", "売上"];

/// Terms negated in the search query itself.
pub const DEFAULT_QUERY_EXCLUDE_TERMS: &[&str] =
    &["ゲーム", "スプラ", "Splatoon", "ギア", "eスポーツ", "フェス", "OCEANS"];

/// Terms that disqualify a returned headline outright.
pub const DEFAULT_TITLE_EXCLUDE_TERMS: &[&str] =
    &["ゲーム", "スプラ", "splatoon", "ギア", "フェス", "OCEANS", "オーシャンズ"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub news: NewsConfig,
    pub locale: LocaleConfig,
    pub aliases: AliasConfig,
    pub http: HttpConfig,
}

/// Search and ranking parameters for the news feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Only articles from the last `recency_days` days are requested.
    pub recency_days: u32,
    /// Upper bound on returned headlines.
    pub max_items: usize,
    /// When set, headlines scoring below `min_score` are dropped.
    pub strict: bool,
    pub min_score: u32,
    /// The feed is asked for `overfetch_factor * max_items` entries so that
    /// filtering still leaves enough.
    pub overfetch_factor: usize,
    pub must_have_terms: Vec<String>,
    pub query_exclude_terms: Vec<String>,
    pub title_exclude_terms: Vec<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            recency_days: 30,
            max_items: 8,
            strict: true,
            min_score: 2,
            overfetch_factor: 3,
            must_have_terms: to_strings(DEFAULT_MUST_HAVE_TERMS),
            query_exclude_terms: to_strings(DEFAULT_QUERY_EXCLUDE_TERMS),
            title_exclude_terms: to_strings(DEFAULT_TITLE_EXCLUDE_TERMS),
        }
    }
}

impl NewsConfig {
    /// Number of raw feed entries to request before filtering.
    pub fn fetch_limit(&self) -> usize {
        self.max_items.saturating_mul(self.overfetch_factor.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub language: String,
    pub country: String,
    pub content_language: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        let locale = Locale::japan();
        Self {
            language: locale.language,
            country: locale.country,
            content_language: locale.content_language,
        }
    }
}

impl LocaleConfig {
    pub fn to_locale(&self) -> Locale {
        Locale {
            language: self.language.clone(),
            country: self.country.clone(),
            content_language: self.content_language.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// CSV/TSV alias table (`ticker`, `alias` columns).
    pub table_path: PathBuf,
    /// YAML override table replacing the built-in one.
    pub overrides_path: Option<PathBuf>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("data/aliases.csv"),
            overrides_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Applied to every upstream call (metadata, prices, feed).
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Parse and validate configuration from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.news.max_items == 0 {
            return Err(ConfigError::Invalid("news.max_items must be at least 1".into()));
        }
        if self.news.overfetch_factor == 0 {
            return Err(ConfigError::Invalid(
                "news.overfetch_factor must be at least 1".into(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

fn to_strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.news.recency_days, 30);
        assert_eq!(config.news.max_items, 8);
        assert!(config.news.strict);
        assert_eq!(config.news.min_score, 2);
        assert_eq!(config.news.fetch_limit(), 24);
        assert_eq!(config.locale.to_locale(), Locale::japan());
        assert_eq!(config.aliases.table_path, PathBuf::from("data/aliases.csv"));
        assert!(config.aliases.overrides_path.is_none());
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert!(config.news.title_exclude_terms.contains(&"スプラ".to_string()));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let toml = r#"
[news]
max_items = 5
strict = false

[aliases]
overrides_path = "conf/overrides.yml"
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.news.max_items, 5);
        assert!(!config.news.strict);
        assert_eq!(config.news.min_score, 2);
        assert_eq!(config.news.fetch_limit(), 15);
        assert_eq!(
            config.aliases.overrides_path,
            Some(PathBuf::from("conf/overrides.yml"))
        );
        assert_eq!(config.aliases.table_path, PathBuf::from("data/aliases.csv"));
    }

    #[test]
    fn locale_can_be_overridden() {
        let toml = r#"
[locale]
language = "en-US"
country = "US"
content_language = "US:en"
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.locale.to_locale().country, "US");
    }

    #[test]
    fn zero_max_items_rejected() {
        let result = Config::from_toml_str("[news]\nmax_items = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_toml_rejected() {
        let result = Config::from_toml_str("[news\nmax_items = ");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Config::from_path(Path::new("/nonexistent/kabudash.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
