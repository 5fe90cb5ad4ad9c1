//! Stock research agents
//!
//! This crate turns a free-text investment question into a thesis written by
//! a Chief Investment Officer agent that consults three analysts:
//!
//! - `FundamentalAnalyst`: financial health from a [`FinancialSnapshot`]
//! - `MarketSentimentAnalyst`: news and public perception via web search
//! - `EconomicAndIndustryAnalyst`: industry and macroeconomic context via web search
//!
//! Market data comes from a [`MarketDataProvider`] (Yahoo Finance by
//! default). The [`SnapshotFetcher`] never fails: lookup errors are returned
//! as a snapshot whose only populated field is `error`.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_stock::{StockConfig, StockPicker, YahooFinanceClient};
//! use agent_runtime::AgentRuntime;
//! use agent_core::{Agent, Context};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = AgentRuntime::builder()
//!         .provider(/* your provider */)
//!         .build()?;
//!
//!     let picker = StockPicker::new(
//!         &runtime,
//!         &StockConfig::default(),
//!         Arc::new(YahooFinanceClient::new()?),
//!     )?;
//!
//!     let mut ctx = Context::new();
//!     let thesis = picker
//!         .process("Should I invest in Google (GOOGL) for the long term?".into(), &mut ctx)
//!         .await?;
//!     println!("{thesis}");
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod prompts;
pub mod snapshot;
pub mod ticker;
pub mod tools;

pub use agents::{
    AnalystTeam, ChiefInvestmentOfficer, EconomicAndIndustryAnalyst, FundamentalAnalyst,
    MarketSentimentAnalyst, ResearchPipeline, StockPicker,
};
pub use api::{InfoBag, MarketDataProvider, YahooEndpoints, YahooFinanceClient};
pub use config::{OrchestrationMode, StockConfig, StockConfigBuilder};
pub use error::{Result, StockError};
pub use fetcher::SnapshotFetcher;
pub use snapshot::FinancialSnapshot;
pub use ticker::TickerExtractor;
pub use tools::{FinancialDataTool, WebSearchTool};
