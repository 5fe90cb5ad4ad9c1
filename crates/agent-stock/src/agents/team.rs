//! The three analysts, built together

use agent_core::Agent;
use agent_runtime::AgentRuntime;
use std::sync::Arc;

use super::{EconomicAndIndustryAnalyst, FundamentalAnalyst, MarketSentimentAnalyst};
use crate::config::StockConfig;
use crate::fetcher::SnapshotFetcher;

/// Analysts the Chief Investment Officer delegates to
#[derive(Clone)]
pub struct AnalystTeam {
    pub fundamental: Arc<dyn Agent>,
    pub sentiment: Arc<dyn Agent>,
    pub economic: Arc<dyn Agent>,
}

impl AnalystTeam {
    /// Build the standard team on `runtime`
    pub fn new(runtime: &AgentRuntime, config: &StockConfig, fetcher: Arc<SnapshotFetcher>) -> Self {
        Self {
            fundamental: Arc::new(FundamentalAnalyst::new(runtime, config, fetcher)),
            sentiment: Arc::new(MarketSentimentAnalyst::new(runtime, config)),
            economic: Arc::new(EconomicAndIndustryAnalyst::new(runtime, config)),
        }
    }

    /// Analysts in the order the CIO consults them
    pub fn members(&self) -> [&Arc<dyn Agent>; 3] {
        [&self.fundamental, &self.sentiment, &self.economic]
    }
}
