mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "kabudash")]
#[command(about = "Single-stock dashboard: prices, dividend yield and relevant news for a ticker")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Path to a kabudash.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked news headlines for a ticker
    News(commands::news::NewsArgs),
    /// Price summary, dividend yield and news for a ticker
    Dashboard(commands::dashboard::DashboardArgs),
    /// Inspect or replace the alias table
    Aliases(commands::aliases::AliasesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("kabudash=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_arg(&cli.output);
    let config = commands::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::News(args) => commands::news::run(args, &config, format).await?,
        Commands::Dashboard(args) => commands::dashboard::run(args, &config, format).await?,
        Commands::Aliases(args) => commands::aliases::run(args, &config, format).await?,
    }

    Ok(())
}
