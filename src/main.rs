//! Command line front end: fetch Alpha Vantage data and dump it as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rust_alphavantage::{
    api::FUNCTION_PARAM, dump_json, dump_json_to_file, AlphaVantageClient, AlphaVantageError,
    Config, FundamentalDataProvider, QueryParameters,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump the company overview for a symbol
    Fundamental {
        /// Ticker symbol, e.g. IBM
        #[arg(short, long)]
        symbol: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Call any API function and dump the decoded JSON document
    Query {
        /// Value of the `function` parameter, e.g. GLOBAL_QUOTE
        #[arg(short, long)]
        function: String,

        /// Extra parameters as key=value, repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", raw)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rust_alphavantage=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_output<T: Serialize>(item: &T, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => dump_json_to_file(path, item)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            dump_json(&mut handle, item).context("Failed to write to stdout")?;
            println!();
            Ok(())
        }
    }
}

async fn fundamental<P: FundamentalDataProvider>(
    provider: &P,
    symbol: &str,
    output: Option<&PathBuf>,
) -> Result<()> {
    let overview = provider
        .company_overview(symbol)
        .await
        .with_context(|| format!("Failed to fetch company overview for {}", symbol))?;
    info!("{} ({}) P/E {}", overview.name, overview.symbol, overview.pe_ratio);
    write_output(&overview, output)
}

async fn query(
    client: &AlphaVantageClient,
    function: String,
    params: Vec<(String, String)>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let mut query_params: QueryParameters = params.into_iter().collect();
    query_params.insert(FUNCTION_PARAM.to_string(), function.clone());

    let response = client
        .get::<serde_json::Value>(&query_params)
        .await
        .with_context(|| format!("Query {} failed", function))?;
    info!("{} answered with HTTP {}", function, response.status);
    write_output(&response.data, output)
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let client =
        AlphaVantageClient::new(&config).context("Failed to create Alpha Vantage client")?;

    match args.command {
        Command::Fundamental { symbol, output } => {
            fundamental(&client, &symbol, output.as_ref()).await
        }
        Command::Query {
            function,
            params,
            output,
        } => query(&client, function, params, output.as_ref()).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(args).await {
        let stage = e
            .downcast_ref::<AlphaVantageError>()
            .map_or("cli", AlphaVantageError::stage);
        error!("[{}] {:#}", stage, e);
        eprintln!("Error [{}]: {:#}", stage, e);
        std::process::exit(1);
    }
}
