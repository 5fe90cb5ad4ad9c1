//! Economic and industry agent

use agent_core::{Agent, Context, Result};
use agent_runtime::{AgentRuntime, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use super::executor_config;
use crate::config::StockConfig;
use crate::prompts::{
    ECONOMIC_AND_INDUSTRY_ANALYST, ECONOMIC_AND_INDUSTRY_ANALYST_DESCRIPTION,
    ECONOMIC_AND_INDUSTRY_ANALYST_INSTRUCTION,
};
use crate::tools::WebSearchTool;

/// Places a company in its industry and macroeconomic context
pub struct EconomicAndIndustryAnalyst {
    agent: ToolAgent,
}

impl EconomicAndIndustryAnalyst {
    pub fn new(runtime: &AgentRuntime, config: &StockConfig) -> Self {
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(WebSearchTool::new()));

        let agent = runtime
            .create_tool_agent_with_tools(
                executor_config(
                    config,
                    &config.economic_model,
                    ECONOMIC_AND_INDUSTRY_ANALYST_INSTRUCTION,
                ),
                ECONOMIC_AND_INDUSTRY_ANALYST,
                tools,
            )
            .with_description(ECONOMIC_AND_INDUSTRY_ANALYST_DESCRIPTION);

        Self { agent }
    }
}

#[async_trait]
impl Agent for EconomicAndIndustryAnalyst {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        ECONOMIC_AND_INDUSTRY_ANALYST
    }

    fn description(&self) -> &str {
        ECONOMIC_AND_INDUSTRY_ANALYST_DESCRIPTION
    }
}
