//! Chief Investment Officer (delegated mode)

use agent_core::{Agent, Context, Result};
use agent_runtime::{AgentRuntime, AgentTool, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use super::{AnalystTeam, executor_config};
use crate::config::StockConfig;
use crate::prompts::{
    CHIEF_INVESTMENT_OFFICER, CHIEF_INVESTMENT_OFFICER_DESCRIPTION,
    chief_investment_officer_instruction,
};

/// Forms an investment thesis by calling each analyst as a tool
///
/// The CIO model decides when to call which analyst; its instruction asks
/// for fundamentals, then sentiment, then the industry outlook.
pub struct ChiefInvestmentOfficer {
    agent: ToolAgent,
}

impl ChiefInvestmentOfficer {
    /// Create a CIO that can call every member of `team`
    pub fn new(runtime: &AgentRuntime, config: &StockConfig, team: &AnalystTeam) -> Self {
        let tools = Arc::new(ToolRegistry::new());
        for analyst in team.members() {
            tools.register(Arc::new(AgentTool::new(Arc::clone(analyst))));
        }

        let instruction = chief_investment_officer_instruction();
        let agent = runtime
            .create_tool_agent_with_tools(
                executor_config(config, &config.cio_model, &instruction),
                CHIEF_INVESTMENT_OFFICER,
                tools,
            )
            .with_description(CHIEF_INVESTMENT_OFFICER_DESCRIPTION);

        Self { agent }
    }

    /// Names of the analysts this CIO can call
    pub fn analyst_names(&self) -> Vec<String> {
        self.agent.executor().tools().names()
    }
}

#[async_trait]
impl Agent for ChiefInvestmentOfficer {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        CHIEF_INVESTMENT_OFFICER
    }

    fn description(&self) -> &str {
        CHIEF_INVESTMENT_OFFICER_DESCRIPTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use crate::fetcher::SnapshotFetcher;
    use agent_core::{AgentEvent, VecSink};
    use agent_llm::testing::{ScriptedProvider, text_response, tool_use_response};
    use serde_json::json;
    use std::time::Duration;

    fn team(runtime: &AgentRuntime) -> AnalystTeam {
        let fetcher = Arc::new(SnapshotFetcher::new(
            Arc::new(MockMarketDataProvider::new()),
            Duration::from_secs(5),
        ));
        AnalystTeam::new(runtime, &StockConfig::default(), fetcher)
    }

    #[test]
    fn test_analysts_registered_as_tools() {
        let llm = Arc::new(ScriptedProvider::new());
        let runtime = AgentRuntime::builder().provider(llm).build().unwrap();
        let cio = ChiefInvestmentOfficer::new(&runtime, &StockConfig::default(), &team(&runtime));

        assert_eq!(
            cio.analyst_names(),
            vec![
                "EconomicAndIndustryAnalyst",
                "FundamentalAnalyst",
                "MarketSentimentAnalyst"
            ]
        );
    }

    #[tokio::test]
    async fn test_delegates_to_analyst_and_synthesizes() {
        let llm = Arc::new(ScriptedProvider::with_responses(vec![
            // CIO asks the sentiment analyst
            tool_use_response(
                "call_0",
                "MarketSentimentAnalyst",
                json!({"request": "Alphabet Inc."}),
            ),
            // sentiment analyst answers
            text_response("Positive coverage."),
            // CIO final thesis
            text_response("Thesis: hold."),
        ]));
        let runtime = AgentRuntime::builder().provider(llm.clone()).build().unwrap();
        let cio = ChiefInvestmentOfficer::new(&runtime, &StockConfig::default(), &team(&runtime));

        let sink = Arc::new(VecSink::new());
        let mut ctx = Context::new().with_event_sink(sink.clone());
        let thesis = cio
            .process("Should I invest in Google (GOOGL)?".to_string(), &mut ctx)
            .await
            .unwrap();

        assert_eq!(thesis, "Thesis: hold.");

        let requests = llm.requests();
        assert_eq!(requests[0].model, "gemini-2.5-pro");
        assert_eq!(requests[1].model, "gemini-2.5-flash");

        let events = sink.events();
        assert!(events.iter().any(|e| matches!(
            e,
            AgentEvent::Text { agent, text } if agent == "MarketSentimentAnalyst" && text == "Positive coverage."
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            AgentEvent::ToolResult { agent, tool, is_error: false, .. }
                if agent == "ChiefInvestmentOfficer" && tool == "MarketSentimentAnalyst"
        )));
    }
}
