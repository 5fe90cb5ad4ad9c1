//! Command-line interface for agent-rs

mod cli;
mod render;

use agent_core::{Agent, AgentEvent};
use agent_iac::{IacConfig, IacCoordinator};
use agent_llm::providers::{GeminiConfig, GeminiProvider};
use agent_runtime::{AgentRuntime, InMemorySessionService, Runner};
use agent_stock::{SnapshotFetcher, StockConfig, StockPicker, YahooFinanceClient};
use agent_utils::{Config, GOOGLE_API_KEY, require_with};
use anyhow::Context as _;
use clap::Parser;
use futures::StreamExt;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::cli::{Cli, Command, DEFAULT_STOCK_QUERY, join_query};

const USER_ID: &str = "cli_user";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    agent_utils::init_tracing_with(cli.log_format.unwrap_or(config.log_format));

    match run(cli, &config, &|key: &str| std::env::var(key).ok()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Execute a parsed command
///
/// `lookup` resolves environment variables; model commands read their
/// credential through it before building any provider or data client.
async fn run<F>(cli: Cli, config: &Config, lookup: &F) -> anyhow::Result<ExitCode>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.command {
        Command::Iac { query, strategy } => {
            let query = join_query(&query).context("the request must not be empty")?;
            let runtime = model_runtime(lookup)?;
            let iac_config = IacConfig::builder().strategy(strategy).build()?;
            let coordinator = IacCoordinator::new(&runtime, &iac_config)?;
            run_agent(config, Arc::new(coordinator), query, cli.json_events).await
        }
        Command::Stock { query, mode } => {
            let query = join_query(&query).unwrap_or_else(|| DEFAULT_STOCK_QUERY.to_string());
            let runtime = model_runtime(lookup)?;
            let stock_config = StockConfig::builder().mode(mode).build()?;
            let picker = StockPicker::new(
                &runtime,
                &stock_config,
                Arc::new(YahooFinanceClient::new()?),
            )?;
            run_agent(config, Arc::new(picker), query, cli.json_events).await
        }
        Command::Snapshot {
            ticker,
            json,
            timeout_secs,
        } => snapshot(&ticker, json, timeout_secs).await,
    }
}

/// Read the model credential
///
/// Runs before any provider exists so a missing key fails without a request.
fn model_credential<F>(lookup: F) -> anyhow::Result<String>
where
    F: FnOnce(&str) -> Option<String>,
{
    require_with(GOOGLE_API_KEY, lookup)
        .context("missing model credential; set GOOGLE_API_KEY to a Gemini API key")
}

fn model_runtime<F>(lookup: &F) -> anyhow::Result<AgentRuntime>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = model_credential(lookup)?;

    let mut gemini = GeminiConfig::new(api_key);
    if let Some(base) = lookup(agent_llm::providers::gemini::API_BASE_ENV) {
        gemini = gemini.with_api_base(base);
    }
    let provider = Arc::new(GeminiProvider::with_config(gemini)?);

    Ok(AgentRuntime::builder().provider(provider).build()?)
}

async fn run_agent(
    config: &Config,
    agent: Arc<dyn Agent>,
    message: String,
    json_events: bool,
) -> anyhow::Result<ExitCode> {
    let sessions = Arc::new(InMemorySessionService::new());
    let session = sessions.create_session(&config.app_name, USER_ID);
    let runner = Runner::new(config.app_name.clone(), agent, sessions);

    info!(session_id = %session.id, "Starting run");
    let mut events = runner.run(USER_ID, &session.id, message)?;

    let mut failed = false;
    let mut finished = false;
    while let Some(event) = events.next().await {
        match &event {
            AgentEvent::Error { agent, message } => {
                error!(agent = %agent, error = %message, "Run failed");
                failed = true;
                finished = true;
            }
            AgentEvent::Final { .. } => finished = true,
            _ => {}
        }
        if json_events {
            println!("{}", render::to_json_line(&event)?);
        } else {
            println!("{}", render::describe(&event));
        }
    }

    if !finished {
        error!("Event stream ended without a result");
    }

    Ok(if failed || !finished {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn snapshot(ticker: &str, json: bool, timeout_secs: u64) -> anyhow::Result<ExitCode> {
    let ticker = ticker.trim().to_ascii_uppercase();
    anyhow::ensure!(!ticker.is_empty(), "the ticker must not be empty");

    let fetcher = SnapshotFetcher::new(
        Arc::new(YahooFinanceClient::new()?),
        Duration::from_secs(timeout_secs),
    );
    let snapshot = fetcher.fetch(&ticker).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render::snapshot_table(&ticker, &snapshot));
    }

    Ok(if snapshot.is_error() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
