use anyhow::Result;
use clap::Args;
use kabudash_lib::{fetch_news_for, validation, Config, YahooClient};

use crate::commands::{alias_store, load_overrides, load_table, news_client, Metadata};
use crate::output::{print_json, print_news, OutputFormat};

#[derive(Args)]
pub struct NewsArgs {
    /// Ticker code, e.g. 7611.T
    pub code: String,

    /// Only search articles from the last N days (1-365)
    #[arg(long)]
    pub days: Option<u32>,

    /// Maximum number of headlines to show (1-100)
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Minimum relevance score kept in strict mode
    #[arg(long)]
    pub min_score: Option<u32>,

    /// Keep low-scoring headlines
    #[arg(long)]
    pub no_strict: bool,

    /// Skip the company-name lookup
    #[arg(long)]
    pub no_metadata: bool,
}

pub async fn run(args: &NewsArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let code = validation::validate_code(&args.code)?;

    let mut settings = config.news.clone();
    if let Some(days) = args.days {
        settings.recency_days = validation::validate_days(days)?;
    }
    if let Some(max_items) = args.max_items {
        settings.max_items = validation::validate_max_items(max_items)?;
    }
    if let Some(min_score) = args.min_score {
        settings.min_score = min_score;
    }
    if args.no_strict {
        settings.strict = false;
    }

    let table = load_table(&alias_store(config))?;
    let overrides = load_overrides(config)?;
    let yahoo = YahooClient::new(config.http.timeout())?;
    let metadata = Metadata::new(&yahoo, args.no_metadata);
    let feed = news_client(config);

    let report = fetch_news_for(
        &code,
        Some(table.as_ref()),
        &overrides,
        &metadata,
        &feed,
        &settings,
    )
    .await;

    if let Some(reason) = &report.feed_error {
        eprintln!("News feed unavailable: {}", reason);
    }

    if format == OutputFormat::Json {
        print_json(&report);
        return Ok(());
    }

    if report.items.is_empty() {
        eprintln!("No news found for {}", report.code);
        return Ok(());
    }

    eprintln!(
        "{} of {} headlines kept for {}",
        report.items.len(),
        report.fetched,
        report.code
    );
    print_news(&report.items, format)
}
