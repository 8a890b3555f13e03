//! CLI subcommand implementations and the setup they share.

pub mod aliases;
pub mod dashboard;
pub mod news;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kabudash_lib::gnews_api::Client;
use kabudash_lib::{
    AliasTable, AliasTableStore, Config, KabudashError, ManualOverrides, MetadataFetcher,
    MetadataOutcome, NoMetadata, YahooClient,
};

const CONFIG_ENV: &str = "KABUDASH_CONFIG";
const ALIAS_TABLE_ENV: &str = "KABUDASH_ALIAS_TABLE";
const DEFAULT_CONFIG_FILE: &str = "kabudash.toml";

/// Loads configuration from `--config`, `KABUDASH_CONFIG`, or `./kabudash.toml`,
/// falling back to defaults when none exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, KabudashError> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });

    let mut config = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            Config::from_path(&path)?
        }
        None => Config::default(),
    };

    if let Some(table) = std::env::var_os(ALIAS_TABLE_ENV) {
        config.aliases.table_path = PathBuf::from(table);
    }
    Ok(config)
}

/// The override file named in the config, or the built-in table.
pub fn load_overrides(config: &Config) -> Result<ManualOverrides, KabudashError> {
    let overrides = match &config.aliases.overrides_path {
        Some(path) => ManualOverrides::from_path(path)?,
        None => ManualOverrides::builtin()?,
    };
    Ok(overrides)
}

pub fn alias_store(config: &Config) -> AliasTableStore {
    AliasTableStore::new(&config.aliases.table_path)
}

/// Current alias table. A malformed file is a user error, not an empty table.
pub fn load_table(store: &AliasTableStore) -> Result<Arc<AliasTable>, KabudashError> {
    Ok(store.load()?)
}

pub fn news_client(config: &Config) -> Client {
    Client::new()
        .with_locale(config.locale.to_locale())
        .with_timeout(config.http.timeout())
}

/// Live metadata lookups, or none when `--no-metadata` is given.
pub enum Metadata<'a> {
    Live(&'a YahooClient),
    Off,
}

impl<'a> Metadata<'a> {
    pub fn new(yahoo: &'a YahooClient, disabled: bool) -> Self {
        if disabled {
            Self::Off
        } else {
            Self::Live(yahoo)
        }
    }
}

impl MetadataFetcher for Metadata<'_> {
    async fn fetch_metadata(&self, code: &str) -> MetadataOutcome {
        match self {
            Self::Live(yahoo) => yahoo.fetch_metadata(code).await,
            Self::Off => NoMetadata.fetch_metadata(code).await,
        }
    }
}
