use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use kabudash_lib::news::build_news_query;
use kabudash_lib::{
    collect_aliases, display_name_for, validation, Config, KabudashError, MetadataFetcher,
    YahooClient,
};
use serde::Serialize;

use crate::commands::{alias_store, load_overrides, load_table, news_client, Metadata};
use crate::output::{print_aliases, print_json, OutputFormat};

#[derive(Args)]
pub struct AliasesArgs {
    #[command(subcommand)]
    pub command: AliasesCommand,
}

#[derive(Subcommand)]
pub enum AliasesCommand {
    /// List alias table rows
    List {
        /// Only rows whose ticker or alias contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Replace the alias table with a CSV/TSV file
    Import {
        /// File with `ticker` and `alias` columns
        file: PathBuf,
    },
    /// Show the resolved aliases and news query for a code
    Show {
        /// Ticker code, e.g. 7611.T
        code: String,

        /// Skip the company-name lookup
        #[arg(long)]
        no_metadata: bool,
    },
}

#[derive(Serialize)]
struct AliasReport {
    code: String,
    display_name: String,
    aliases: Vec<String>,
    query: String,
    url: String,
}

pub async fn run(args: &AliasesArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let store = alias_store(config);

    match &args.command {
        AliasesCommand::List { search } => {
            let table = load_table(&store)?;
            let rows = table.search(search.as_deref().unwrap_or(""));
            eprintln!(
                "{} of {} rows ({})",
                rows.len(),
                table.len(),
                store.path().display()
            );
            print_aliases(&rows, format)?;
        }
        AliasesCommand::Import { file } => {
            let count = store.import(file).map_err(KabudashError::from)?;
            eprintln!("Imported {} rows into {}", count, store.path().display());
        }
        AliasesCommand::Show { code, no_metadata } => {
            let code = validation::validate_code(code)?;
            let table = load_table(&store)?;
            let overrides = load_overrides(config)?;
            let yahoo = YahooClient::new(config.http.timeout())?;
            let metadata = Metadata::new(&yahoo, *no_metadata);

            let meta = metadata.fetch_metadata(&code).await.into_metadata();
            let aliases = collect_aliases(&code, meta.as_ref(), Some(table.as_ref()), &overrides);
            let query = build_news_query(&aliases, &config.news);
            let url = news_client(config).search_url(&query)?;

            let report = AliasReport {
                display_name: display_name_for(&code, Some(table.as_ref()), meta.as_ref()),
                code,
                aliases: aliases.into_iter().collect(),
                query: query.to_query_string(),
                url: url.to_string(),
            };

            if format == OutputFormat::Json {
                print_json(&report);
            } else {
                println!("{}（{}）", report.display_name, report.code);
                for alias in &report.aliases {
                    println!("  {}", alias);
                }
                println!("query: {}", report.query);
                println!("url:   {}", report.url);
            }
        }
    }

    Ok(())
}
