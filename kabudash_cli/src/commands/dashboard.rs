use anyhow::{bail, Result};
use clap::Args;
use kabudash_lib::dividends::TTM_DAYS;
use kabudash_lib::{
    collect_aliases, dividend_info, display_name_for, fetch_news_with_aliases, validation, Config,
    DividendInfo, MetadataFetcher, NewsReport, PriceBar, PriceSummary, YahooClient,
};
use serde::Serialize;

use crate::commands::{alias_store, load_overrides, load_table, news_client, Metadata};
use crate::output::{
    dividend_summary_line, dividend_table, news_table, price_summary_line, price_table, print_json,
    OutputFormat,
};

/// Bars shown under the price summary in table output.
const RECENT_BARS: usize = 10;

#[derive(Args)]
pub struct DashboardArgs {
    /// Ticker code, e.g. 7611.T
    pub code: String,

    /// Price history period: 1mo, 3mo, 6mo, 1y
    #[arg(long, default_value = "6mo")]
    pub period: String,

    /// Bar interval: 1d, 1wk, 1mo
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Skip the company-name lookup
    #[arg(long)]
    pub no_metadata: bool,
}

#[derive(Serialize)]
struct DashboardReport {
    code: String,
    name: String,
    period: &'static str,
    interval: &'static str,
    price: Option<PriceSummary>,
    bars: Vec<PriceBar>,
    dividends: DividendInfo,
    news: NewsReport,
}

pub async fn run(args: &DashboardArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let code = validation::validate_code(&args.code)?;
    let period = validation::validate_period(&args.period)?;
    let interval = validation::validate_interval(&args.interval)?;
    if format == OutputFormat::Csv {
        bail!("CSV output is not available for the dashboard; use --output json");
    }

    let table = load_table(&alias_store(config))?;
    let overrides = load_overrides(config)?;
    let yahoo = YahooClient::new(config.http.timeout())?;
    let feed = news_client(config);

    let metadata = Metadata::new(&yahoo, args.no_metadata)
        .fetch_metadata(&code)
        .await
        .into_metadata();
    let name = display_name_for(&code, Some(table.as_ref()), metadata.as_ref());
    let aliases = collect_aliases(&code, metadata.as_ref(), Some(table.as_ref()), &overrides);

    let (bars, events, news) = tokio::join!(
        yahoo.get_price_history(&code, period, interval),
        yahoo.get_dividends(&code),
        fetch_news_with_aliases(&code, aliases, &feed, &config.news),
    );

    let bars = bars.unwrap_or_else(|e| {
        tracing::warn!("Price history unavailable for {}: {}", code, e);
        Vec::new()
    });
    let events = events.unwrap_or_else(|e| {
        tracing::warn!("Dividend history unavailable for {}: {}", code, e);
        Vec::new()
    });

    let price = PriceSummary::from_bars(&bars);
    let last_close = price.as_ref().map_or(0.0, |p| p.last_close);
    let today = chrono::Utc::now().date_naive();
    let dividends = dividend_info(&events, last_close, today, TTM_DAYS);

    let report = DashboardReport {
        code,
        name,
        period,
        interval,
        price,
        bars,
        dividends,
        news,
    };

    if format == OutputFormat::Json {
        print_json(&report);
    } else {
        print_dashboard(&report, format == OutputFormat::Markdown);
    }
    Ok(())
}

fn print_dashboard(report: &DashboardReport, markdown: bool) {
    let heading = if markdown { "## " } else { "" };
    let section = if markdown { "### " } else { "" };

    println!("{}{}（{}）", heading, report.name, report.code);
    println!();

    println!("{}Price ({}, {})", section, report.period, report.interval);
    match &report.price {
        Some(summary) => {
            println!("{}", price_summary_line(summary));
            let start = report.bars.len().saturating_sub(RECENT_BARS);
            println!("{}", price_table(&report.bars[start..], markdown));
        }
        None => println!("No price data for {}", report.code),
    }
    println!();

    println!("{}Dividends", section);
    match dividend_summary_line(&report.dividends) {
        Some(line) => {
            println!("{}", line);
            println!("{}", dividend_table(&report.dividends.recent, markdown));
        }
        None => println!("No dividend data for {}", report.code),
    }
    println!();

    println!("{}News", section);
    if let Some(reason) = &report.news.feed_error {
        eprintln!("News feed unavailable: {}", reason);
    }
    if report.news.items.is_empty() {
        println!("No news found for {}", report.code);
    } else {
        println!("{}", news_table(&report.news.items, markdown));
    }
}
