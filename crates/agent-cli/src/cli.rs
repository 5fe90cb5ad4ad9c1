//! Command-line arguments

use agent_iac::RoutingStrategy;
use agent_stock::OrchestrationMode;
use agent_utils::LogFormat;
use clap::{Parser, Subcommand};

/// Query used by `stock` when none is given
pub const DEFAULT_STOCK_QUERY: &str = "Should I invest in Google (GOOGL) for the long term?";

/// Multi-agent assistants for GCP infrastructure-as-code and stock research
#[derive(Debug, Parser)]
#[command(name = "agent-cli", author, version, about, long_about = None)]
pub struct Cli {
    /// Log format on stderr (text or json); defaults to AGENT_LOG_FORMAT, then text
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Print run events as JSON lines instead of formatted text
    #[arg(long, global = true, default_value_t = false)]
    pub json_events: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate Terraform or a Kubernetes manifest for a GCP request
    Iac {
        /// The request, e.g. "a GCS bucket with versioning"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// What to do when the keyword rules tie (rules or rules_then_model)
        #[arg(long, default_value = "rules")]
        strategy: RoutingStrategy,
    },

    /// Research a stock and produce an investment thesis
    Stock {
        /// The investment question
        query: Vec<String>,

        /// How the Chief Investment Officer consults the analysts (delegated or pipeline)
        #[arg(long, default_value = "delegated")]
        mode: OrchestrationMode,
    },

    /// Print the financial snapshot for a ticker
    Snapshot {
        ticker: String,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Lookup timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}

/// Join positional words into one message
pub fn join_query(words: &[String]) -> Option<String> {
    let query = words.join(" ");
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_string())
}
