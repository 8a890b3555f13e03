//! Manual alias overrides for known problem tickers.
//!
//! Brand-name collisions and tickers whose live metadata has no usable name
//! get extra aliases here. The built-in table is embedded at compile time
//! with `include_str!`; a replacement can be loaded from a YAML file named in
//! the configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::normalize::normalize;

/// Error types for override table operations.
#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("Failed to parse override YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate ticker in override file: {0}")]
    DuplicateTicker(String),
    #[error("Failed to read override file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Top-level structure of the override YAML file.
#[derive(Deserialize, Debug)]
pub struct OverrideFile {
    pub overrides: Vec<OverrideEntry>,
}

/// Aliases attached to one ticker.
#[derive(Deserialize, Debug, Clone)]
pub struct OverrideEntry {
    pub ticker: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Ticker → manual aliases, keyed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct ManualOverrides {
    map: HashMap<String, Vec<String>>,
}

impl ManualOverrides {
    /// Parse overrides from YAML content.
    ///
    /// Tickers and aliases are normalized; empty and repeated aliases are
    /// dropped. The same
    /// ticker appearing twice (after normalization) is rejected.
    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, OverrideError> {
        let file: OverrideFile = serde_yml::from_str(yaml_content)?;

        let mut map = HashMap::new();
        for entry in file.overrides {
            let ticker = normalize(&entry.ticker);
            if map.contains_key(&ticker) {
                return Err(OverrideError::DuplicateTicker(ticker));
            }
            let mut aliases: Vec<String> = Vec::new();
            for alias in entry.aliases.iter().map(|a| normalize(a)) {
                if !alias.is_empty() && !aliases.contains(&alias) {
                    aliases.push(alias);
                }
            }
            map.insert(ticker, aliases);
        }

        Ok(Self { map })
    }

    /// Load overrides from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, OverrideError> {
        let content = std::fs::read_to_string(path).map_err(|source| OverrideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, OverrideError> {
        let yaml_content = include_str!("../../seed_data/manual_aliases.yml");
        Self::from_yaml_str(yaml_content)
    }

    /// Manual aliases for `code`, matched exactly after normalization.
    pub fn aliases_for(&self, code: &str) -> &[String] {
        self.map
            .get(&normalize(code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_overrides() {
        let yaml = r#"
overrides:
  - ticker: "7611.T"
    aliases: ["ハイデイ日高", "日高屋"]
  - ticker: "2705.T"
    aliases: ["大戸屋"]
"#;
        let table = ManualOverrides::from_yaml_str(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.aliases_for("7611.T"), ["ハイデイ日高", "日高屋"]);
        assert_eq!(table.aliases_for("2705.T"), ["大戸屋"]);
    }

    #[test]
    fn test_aliases_are_normalized() {
        let yaml = r#"
overrides:
  - ticker: "５０２０．Ｔ"
    aliases: ["ＥＮＥＯＳ", "  ", ""]
"#;
        let table = ManualOverrides::from_yaml_str(yaml).unwrap();
        assert_eq!(table.aliases_for("5020.T"), ["ENEOS"]);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = ManualOverrides::builtin().unwrap();
        assert!(table.aliases_for("7611").is_empty());
        assert!(table.aliases_for("7611.t").is_empty());
        assert!(!table.aliases_for("7611.T").is_empty());
    }

    #[test]
    fn test_duplicate_ticker_rejected() {
        let yaml = r#"
overrides:
  - ticker: "7611.T"
    aliases: ["日高屋"]
  - ticker: "７６１１．Ｔ"
    aliases: ["ハイデイ日高"]
"#;
        let result = ManualOverrides::from_yaml_str(yaml);
        assert!(matches!(result.unwrap_err(), OverrideError::DuplicateTicker(_)));
    }

    #[test]
    fn test_missing_aliases_field_defaults_empty() {
        let yaml = r#"
overrides:
  - ticker: "9999.T"
"#;
        let table = ManualOverrides::from_yaml_str(yaml).unwrap();
        assert!(table.aliases_for("9999.T").is_empty());
    }

    #[test]
    fn test_builtin_loads() {
        let table = ManualOverrides::builtin().unwrap();
        assert_eq!(table.aliases_for("7611.T"), ["ハイデイ日高", "日高屋"]);
        assert_eq!(table.aliases_for("5020.T"), ["ENEOS"]);
    }

    #[test]
    fn test_unknown_ticker_is_empty() {
        let table = ManualOverrides::builtin().unwrap();
        assert!(table.aliases_for("5108.T").is_empty());
    }
}
