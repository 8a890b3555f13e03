//! Alias resolution: every name a ticker might appear under in a headline.

use std::collections::BTreeSet;

use crate::alias_table::AliasTable;
use crate::metadata::{CompanyMetadata, MetadataFetcher};
use crate::normalize::{has_japanese_script, normalize, strip_exchange_suffix};
use crate::overrides::ManualOverrides;

/// Merges the code, its suffix-less core, metadata names, alias-table rows
/// and manual overrides into one normalized, de-duplicated set.
pub fn collect_aliases(
    code: &str,
    metadata: Option<&CompanyMetadata>,
    table: Option<&AliasTable>,
    overrides: &ManualOverrides,
) -> BTreeSet<String> {
    let code = normalize(code);
    let mut aliases = BTreeSet::new();

    let mut add = |candidate: &str| {
        let candidate = normalize(candidate);
        if !candidate.is_empty() {
            aliases.insert(candidate);
        }
    };

    add(&code);
    add(strip_exchange_suffix(&code));
    if let Some(meta) = metadata {
        meta.names().for_each(&mut add);
    }
    if let Some(table) = table {
        table.aliases_for(&code).into_iter().for_each(&mut add);
    }
    overrides
        .aliases_for(&code)
        .iter()
        .for_each(|alias| add(alias));

    aliases
}

/// Looks up company metadata and collects the full alias set for `code`.
///
/// A failed metadata lookup only narrows the set; it never fails the call.
pub async fn resolve_aliases<F: MetadataFetcher>(
    code: &str,
    table: Option<&AliasTable>,
    overrides: &ManualOverrides,
    fetcher: &F,
) -> BTreeSet<String> {
    let outcome = fetcher.fetch_metadata(&normalize(code)).await;
    let aliases = collect_aliases(code, outcome.metadata(), table, overrides);
    tracing::debug!("Resolved {} aliases for {}", aliases.len(), code);
    aliases
}

/// Heading name for a ticker.
///
/// Prefers the longest Japanese-script alias from the table (first one wins
/// on ties), then the metadata long/short name, then the code itself.
pub fn display_name_for(
    code: &str,
    table: Option<&AliasTable>,
    metadata: Option<&CompanyMetadata>,
) -> String {
    let code = normalize(code);

    if let Some(table) = table {
        let mut best: Option<&str> = None;
        for alias in table.aliases_for(&code) {
            if !has_japanese_script(alias) {
                continue;
            }
            let longer = best.map_or(true, |b| alias.chars().count() > b.chars().count());
            if longer {
                best = Some(alias);
            }
        }
        if let Some(name) = best {
            return name.to_string();
        }
    }

    metadata
        .and_then(CompanyMetadata::display_name)
        .map(str::to_string)
        .unwrap_or(code)
}
