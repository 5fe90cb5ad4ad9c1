//! Entry point for stock research runs

use agent_core::{Agent, Context, Result};
use agent_runtime::AgentRuntime;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{AnalystTeam, ChiefInvestmentOfficer, ResearchPipeline};
use crate::api::MarketDataProvider;
use crate::config::{OrchestrationMode, StockConfig};
use crate::fetcher::SnapshotFetcher;

/// Root agent for stock research, orchestrated per [`OrchestrationMode`]
pub struct StockPicker {
    root: Arc<dyn Agent>,
    mode: OrchestrationMode,
}

impl StockPicker {
    /// Build the analysts and the root agent for `config.mode`
    pub fn new(
        runtime: &AgentRuntime,
        config: &StockConfig,
        market: Arc<dyn MarketDataProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let fetcher = Arc::new(SnapshotFetcher::new(market, config.request_timeout));
        let team = AnalystTeam::new(runtime, config, Arc::clone(&fetcher));

        let root: Arc<dyn Agent> = match config.mode {
            OrchestrationMode::Delegated => {
                Arc::new(ChiefInvestmentOfficer::new(runtime, config, &team))
            }
            OrchestrationMode::Pipeline => {
                Arc::new(ResearchPipeline::new(runtime, config, team, fetcher)?)
            }
        };
        debug!(mode = %config.mode, root = %root.name(), "Stock picker ready");

        Ok(Self {
            root,
            mode: config.mode,
        })
    }

    pub fn mode(&self) -> OrchestrationMode {
        self.mode
    }

    /// The agent that handles each request
    pub fn root(&self) -> Arc<dyn Agent> {
        Arc::clone(&self.root)
    }
}

#[async_trait]
impl Agent for StockPicker {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.root.process(input, context).await
    }

    fn name(&self) -> &str {
        self.root.name()
    }

    fn description(&self) -> &str {
        self.root.description()
    }
}
