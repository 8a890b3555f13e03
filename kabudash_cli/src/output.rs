use anyhow::Result;
use kabudash_lib::{AliasEntry, DividendEvent, DividendInfo, DividendMethod, NewsItem, PriceBar, PriceSummary};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a plain table.
    pub fn from_arg(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct NewsRow {
    #[tabled(rename = "Score")]
    #[serde(rename = "Score")]
    score: u32,
    #[tabled(rename = "Published")]
    #[serde(rename = "Published")]
    published: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Link")]
    #[serde(rename = "Link")]
    link: String,
}

#[derive(Tabled, Serialize)]
struct AliasRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Alias")]
    #[serde(rename = "Alias")]
    alias: String,
}

#[derive(Tabled, Serialize)]
struct PriceRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
}

#[derive(Tabled, Serialize)]
struct DividendRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
}

// -- Row builders --

fn build_news_rows(items: &[NewsItem]) -> Vec<NewsRow> {
    items
        .iter()
        .map(|i| NewsRow {
            score: i.score,
            published: i.published.clone(),
            title: i.title.clone(),
            link: i.link.clone(),
        })
        .collect()
}

fn build_alias_rows(entries: &[&AliasEntry]) -> Vec<AliasRow> {
    entries
        .iter()
        .map(|e| AliasRow {
            ticker: e.ticker.clone(),
            alias: e.alias.clone(),
        })
        .collect()
}

fn build_price_rows(bars: &[PriceBar]) -> Vec<PriceRow> {
    bars.iter()
        .map(|b| PriceRow {
            date: b.date.to_string(),
            open: format_price(b.open),
            high: format_price(b.high),
            low: format_price(b.low),
            close: format_price(b.close),
            volume: format_volume(b.volume),
        })
        .collect()
}

fn build_dividend_rows(events: &[DividendEvent]) -> Vec<DividendRow> {
    events
        .iter()
        .map(|e| DividendRow {
            date: e.date.to_string(),
            amount: format!("{:.2}", e.amount),
        })
        .collect()
}

// -- Rendering --

fn render<T: Tabled>(rows: Vec<T>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn write_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_news(items: &[NewsItem], format: OutputFormat) -> Result<()> {
    let rows = build_news_rows(items);
    match format {
        OutputFormat::Table => println!("{}", render(rows, false)),
        OutputFormat::Markdown => println!("{}", render(rows, true)),
        OutputFormat::Csv => write_csv(&rows)?,
        OutputFormat::Json => print_json(&items),
    }
    Ok(())
}

pub fn print_aliases(entries: &[&AliasEntry], format: OutputFormat) -> Result<()> {
    let rows = build_alias_rows(entries);
    match format {
        OutputFormat::Table => println!("{}", render(rows, false)),
        OutputFormat::Markdown => println!("{}", render(rows, true)),
        OutputFormat::Csv => write_csv(&rows)?,
        OutputFormat::Json => print_json(&entries),
    }
    Ok(())
}

pub fn price_table(bars: &[PriceBar], markdown: bool) -> String {
    render(build_price_rows(bars), markdown)
}

pub fn dividend_table(events: &[DividendEvent], markdown: bool) -> String {
    render(build_dividend_rows(events), markdown)
}

pub fn news_table(items: &[NewsItem], markdown: bool) -> String {
    render(build_news_rows(items), markdown)
}

// -- Summary lines --

pub fn price_summary_line(summary: &PriceSummary) -> String {
    format!(
        "{} bars {} to {} | last close {} | change {} | range {} - {}",
        summary.bars,
        summary.first_date,
        summary.last_date,
        format_price(summary.last_close),
        format_change(summary.change_pct),
        format_price(summary.min_close),
        format_price(summary.max_close),
    )
}

pub fn dividend_summary_line(info: &DividendInfo) -> Option<String> {
    match info.method {
        DividendMethod::Ttm => Some(format!(
            "TTM dividend {:.2} | yield {}",
            info.ttm_dividend.unwrap_or_default(),
            format_pct(info.yield_pct),
        )),
        DividendMethod::FallbackLastTwo => Some(format!(
            "Latest two payments {:.2} | yield {} (no payments in the trailing window)",
            info.alt_dividend.unwrap_or_default(),
            format_pct(info.alt_yield_pct),
        )),
        DividendMethod::NoData => None,
    }
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(value: f64) -> String {
    format!("{:.1}", value)
}

fn format_volume(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

fn format_change(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{:+.2}%", p),
        None => "n/a".to_string(),
    }
}

fn format_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{:.2}%", p),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
