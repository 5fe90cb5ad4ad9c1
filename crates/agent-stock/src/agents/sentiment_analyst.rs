//! Market sentiment agent

use agent_core::{Agent, Context, Result};
use agent_runtime::{AgentRuntime, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use super::executor_config;
use crate::config::StockConfig;
use crate::prompts::{
    MARKET_SENTIMENT_ANALYST, MARKET_SENTIMENT_ANALYST_DESCRIPTION,
    MARKET_SENTIMENT_ANALYST_INSTRUCTION,
};
use crate::tools::WebSearchTool;

/// Gauges news flow, analyst ratings and public perception through web search
pub struct MarketSentimentAnalyst {
    agent: ToolAgent,
}

impl MarketSentimentAnalyst {
    /// Create a new market sentiment analyst
    pub fn new(runtime: &AgentRuntime, config: &StockConfig) -> Self {
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(WebSearchTool::new()));

        let agent = runtime
            .create_tool_agent_with_tools(
                executor_config(
                    config,
                    &config.sentiment_model,
                    MARKET_SENTIMENT_ANALYST_INSTRUCTION,
                ),
                MARKET_SENTIMENT_ANALYST,
                tools,
            )
            .with_description(MARKET_SENTIMENT_ANALYST_DESCRIPTION);

        Self { agent }
    }
}

#[async_trait]
impl Agent for MarketSentimentAnalyst {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        MARKET_SENTIMENT_ANALYST
    }

    fn description(&self) -> &str {
        MARKET_SENTIMENT_ANALYST_DESCRIPTION
    }
}
