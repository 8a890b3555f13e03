//! User-maintained alias table: `ticker` → `alias` rows in a CSV/TSV file.
//!
//! The table is read through [`AliasTableStore`], which caches the parsed
//! file until the next write.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::cache::LoadOnceCache;
use crate::normalize::{fold, normalize};

/// Column names written to disk.
pub const DEFAULT_COLUMNS: [&str; 2] = ["ticker", "alias"];

/// Error types for alias table operations.
#[derive(Error, Debug)]
pub enum AliasTableError {
    #[error("Alias table is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Unsupported alias table format '{0}' (expected .csv, .tsv or .txt)")]
    UnsupportedFormat(String),
    #[error("Failed to parse alias table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Alias table I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One `ticker` → `alias` row. Both fields are normalized and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub ticker: String,
    pub alias: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Column {
    Ticker,
    Alias,
}

/// Maps a header cell to a known column, tolerating the usual spelling
/// variations (`Ticker Code`, `alias_name`, `コード`, `銘柄名`, ...).
fn canonical_column(header: &str) -> Option<Column> {
    let key: String = fold(header)
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.' | '(' | ')' | '\u{feff}'))
        .collect();
    if key.starts_with("ticker") || matches!(key.as_str(), "code" | "ティッカー" | "コード") {
        Some(Column::Ticker)
    } else if key.starts_with("alias") || matches!(key.as_str(), "name" | "エイリアス" | "銘柄名")
    {
        Some(Column::Alias)
    } else {
        None
    }
}

/// Picks the field delimiter from the header line: tab if it has tabs and
/// no commas, comma otherwise.
fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if header.contains('\t') && !header.contains(',') {
        b'\t'
    } else {
        b','
    }
}

/// Many aliases per ticker; exact duplicate rows are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Parse a delimited table with a header row.
    ///
    /// The header must name both a ticker and an alias column; other
    /// columns are ignored. A completely empty input is an empty table.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, AliasTableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Ok(Self::default());
        }

        let mut ticker_idx = None;
        let mut alias_idx = None;
        for (idx, header) in headers.iter().enumerate() {
            match canonical_column(header) {
                Some(Column::Ticker) if ticker_idx.is_none() => ticker_idx = Some(idx),
                Some(Column::Alias) if alias_idx.is_none() => alias_idx = Some(idx),
                _ => {}
            }
        }
        let ticker_idx = ticker_idx.ok_or(AliasTableError::MissingColumn("ticker"))?;
        let alias_idx = alias_idx.ok_or(AliasTableError::MissingColumn("alias"))?;

        let mut table = Self::default();
        for record in rdr.records() {
            let record = record?;
            table.insert(
                record.get(ticker_idx).unwrap_or(""),
                record.get(alias_idx).unwrap_or(""),
            );
        }
        tracing::debug!("Parsed alias table with {} entries", table.len());
        Ok(table)
    }

    /// Load a table from a `.csv`, `.tsv` or `.txt` file.
    pub fn from_path(path: &Path) -> Result<Self, AliasTableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let content = match ext.as_str() {
            "csv" | "tsv" | "txt" => std::fs::read_to_string(path)?,
            _ => return Err(AliasTableError::UnsupportedFormat(path.display().to_string())),
        };
        let delimiter = if ext == "tsv" {
            b'\t'
        } else {
            sniff_delimiter(&content)
        };
        Self::from_reader(content.as_bytes(), delimiter)
    }

    /// Adds a row after normalizing both fields. Rows with an empty field
    /// and exact duplicates are skipped. Returns whether the row was added.
    pub fn insert(&mut self, ticker: &str, alias: &str) -> bool {
        let entry = AliasEntry {
            ticker: normalize(ticker),
            alias: normalize(alias),
        };
        if entry.ticker.is_empty() || entry.alias.is_empty() || self.entries.contains(&entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Aliases registered for `code`, in file order.
    pub fn aliases_for(&self, code: &str) -> Vec<&str> {
        let code = normalize(code);
        self.entries
            .iter()
            .filter(|e| e.ticker == code)
            .map(|e| e.alias.as_str())
            .collect()
    }

    /// Rows whose ticker or alias contains `query`, ignoring case and width.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&AliasEntry> {
        let needle = fold(query);
        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.ticker.to_lowercase().contains(&needle)
                    || e.alias.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the table with a `ticker,alias` header.
    pub fn write_to<W: Write>(&self, writer: W, delimiter: u8) -> Result<(), AliasTableError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        wtr.write_record(DEFAULT_COLUMNS)?;
        for entry in &self.entries {
            wtr.write_record([entry.ticker.as_str(), entry.alias.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// File-backed alias table with a load-once cache.
///
/// `load` parses the file on first use and serves the cached table after
/// that; `save` and `import` write the file and invalidate the cache.
pub struct AliasTableStore {
    path: PathBuf,
    cache: LoadOnceCache<AliasTable>,
}

impl AliasTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: LoadOnceCache::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current table. A missing file is an empty table; a
    /// malformed one is an error.
    pub fn load(&self) -> Result<Arc<AliasTable>, AliasTableError> {
        self.cache.get_or_try_load(&self.path, || {
            if !self.path.exists() {
                tracing::debug!("No alias table at {}", self.path.display());
                return Ok(AliasTable::default());
            }
            AliasTable::from_path(&self.path)
        })
    }

    /// Replaces the file with `table` and drops the cached copy.
    ///
    /// Writes to a sibling temp file first and renames it into place.
    pub fn save(&self, table: &AliasTable) -> Result<&Path, AliasTableError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let delimiter = match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let file = std::fs::File::create(&tmp)?;
        table.write_to(std::io::BufWriter::new(file), delimiter)?;
        std::fs::rename(&tmp, &self.path)?;

        self.invalidate();
        tracing::info!(
            "Saved {} aliases to {}",
            table.len(),
            self.path.display()
        );
        Ok(&self.path)
    }

    /// Reads another table file and saves it as the current table.
    /// Returns the number of rows imported.
    pub fn import(&self, source: &Path) -> Result<usize, AliasTableError> {
        let table = AliasTable::from_path(source)?;
        self.save(&table)?;
        Ok(table.len())
    }

    /// Forces the next `load` to re-read the file.
    pub fn invalidate(&self) {
        self.cache.invalidate(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<AliasTable, AliasTableError> {
        AliasTable::from_reader(csv.as_bytes(), b',')
    }

    #[test]
    fn test_parse_basic() {
        let table = parse("ticker,alias\n7611.T,ハイデイ日高\n7611.T,日高屋\n2705.T,大戸屋\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.aliases_for("7611.T"), vec!["ハイデイ日高", "日高屋"]);
        assert_eq!(table.aliases_for("2705.T"), vec!["大戸屋"]);
        assert!(table.aliases_for("5108.T").is_empty());
    }

    #[test]
    fn test_header_variants() {
        let table = parse("Ticker Code,銘柄名,memo\n5108.T,ブリヂストン,x\n").unwrap();
        assert_eq!(table.aliases_for("5108.T"), vec!["ブリヂストン"]);

        let table = parse("コード,エイリアス\n5108.T,ブリヂストン\n").unwrap();
        assert_eq!(table.len(), 1);

        let table = parse("\u{feff}ticker,alias_name\nAAPL,Apple\n").unwrap();
        assert_eq!(table.aliases_for("AAPL"), vec!["Apple"]);
    }

    #[test]
    fn test_missing_column_is_error() {
        let err = parse("ticker,memo\n7611.T,x\n").unwrap_err();
        assert!(matches!(err, AliasTableError::MissingColumn("alias")));

        let err = parse("alias\n日高屋\n").unwrap_err();
        assert!(matches!(err, AliasTableError::MissingColumn("ticker")));
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_cells_normalized_and_blank_rows_dropped() {
        let table = parse("ticker,alias\n ７６１１．Ｔ , ﾊｲﾃﾞｲ日高 \n,orphan\n7611.T,\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].ticker, "7611.T");
        assert_eq!(table.entries()[0].alias, "ハイデイ日高");
    }

    #[test]
    fn test_duplicate_rows_collapsed() {
        let table = parse("ticker,alias\n7611.T,日高屋\n7611.T,日高屋\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_short_rows_tolerated() {
        let table = parse("ticker,alias,memo\n7611.T\n2705.T,大戸屋\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_tab_delimited() {
        let table = AliasTable::from_reader("ticker\talias\n7611.T\t日高屋\n".as_bytes(), b'\t').unwrap();
        assert_eq!(table.aliases_for("7611.T"), vec!["日高屋"]);
        assert_eq!(sniff_delimiter("ticker\talias\n"), b'\t');
        assert_eq!(sniff_delimiter("ticker,alias\n"), b',');
    }

    #[test]
    fn test_search() {
        let table = parse("ticker,alias\n7611.T,ハイデイ日高\n5020.T,ENEOS\n").unwrap();
        assert_eq!(table.search("eneos").len(), 1);
        assert_eq!(table.search("ＥＮＥＯＳ").len(), 1);
        assert_eq!(table.search("7611").len(), 1);
        assert_eq!(table.search("").len(), 2);
        assert!(table.search("トヨタ").is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let mut table = AliasTable::default();
        table.insert("7611.T", "日高屋");
        table.insert("5020.T", "ENEOS, Inc.");
        let mut buf = Vec::new();
        table.write_to(&mut buf, b',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("ticker,alias"));
        assert_eq!(parse(&text).unwrap(), table);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = AliasTable::from_path(Path::new("aliases.xlsx")).unwrap_err();
        assert!(matches!(err, AliasTableError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasTableStore::new(dir.path().join("aliases.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_store_save_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasTableStore::new(dir.path().join("data").join("aliases.csv"));
        assert!(store.load().unwrap().is_empty());

        let mut table = AliasTable::default();
        table.insert("7611.T", "日高屋");
        store.save(&table).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.aliases_for("7611.T"), vec!["日高屋"]);
        assert!(!dir.path().join("data").join("aliases.csv.tmp").exists());
    }

    #[test]
    fn test_store_serves_cached_copy_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.csv");
        std::fs::write(&path, "ticker,alias\n7611.T,日高屋\n").unwrap();
        let store = AliasTableStore::new(&path);
        assert_eq!(store.load().unwrap().len(), 1);

        std::fs::write(&path, "ticker,alias\n7611.T,日高屋\n2705.T,大戸屋\n").unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        store.invalidate();
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_store_import() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("upload.tsv");
        std::fs::write(&source, "コード\t銘柄名\n2705.T\t大戸屋\n").unwrap();
        let store = AliasTableStore::new(dir.path().join("aliases.csv"));

        assert_eq!(store.import(&source).unwrap(), 1);
        assert_eq!(store.load().unwrap().aliases_for("2705.T"), vec!["大戸屋"]);
    }

    #[test]
    fn test_store_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.csv");
        std::fs::write(&path, "symbol,label\n7611.T,日高屋\n").unwrap();
        let store = AliasTableStore::new(&path);
        assert!(matches!(
            store.load().unwrap_err(),
            AliasTableError::MissingColumn("ticker")
        ));
    }
}
