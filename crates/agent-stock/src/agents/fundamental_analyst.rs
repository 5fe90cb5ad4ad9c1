//! Fundamental analysis agent

use agent_core::{Agent, Context, Result};
use agent_runtime::{AgentRuntime, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use super::executor_config;
use crate::config::StockConfig;
use crate::fetcher::SnapshotFetcher;
use crate::prompts::{
    FUNDAMENTAL_ANALYST, FUNDAMENTAL_ANALYST_DESCRIPTION, FUNDAMENTAL_ANALYST_INSTRUCTION,
};
use crate::tools::FinancialDataTool;

/// Reports on a company's financial health from its snapshot
///
/// Its only tool is `get_financial_data`.
pub struct FundamentalAnalyst {
    agent: ToolAgent,
}

impl FundamentalAnalyst {
    /// Create a new fundamental analyst
    pub fn new(runtime: &AgentRuntime, config: &StockConfig, fetcher: Arc<SnapshotFetcher>) -> Self {
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(FinancialDataTool::new(fetcher)));

        let agent = runtime
            .create_tool_agent_with_tools(
                executor_config(config, &config.fundamental_model, FUNDAMENTAL_ANALYST_INSTRUCTION),
                FUNDAMENTAL_ANALYST,
                tools,
            )
            .with_description(FUNDAMENTAL_ANALYST_DESCRIPTION);

        Self { agent }
    }
}

#[async_trait]
impl Agent for FundamentalAnalyst {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        FUNDAMENTAL_ANALYST
    }

    fn description(&self) -> &str {
        FUNDAMENTAL_ANALYST_DESCRIPTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{InfoBag, MockMarketDataProvider};
    use agent_core::{AgentEvent, VecSink};
    use agent_llm::testing::{ScriptedProvider, text_response, tool_use_response};
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_calls_financial_data_tool() {
        let mut market = MockMarketDataProvider::new();
        market.expect_ticker_info().times(1).returning(|symbol| {
            assert_eq!(symbol, "GOOGL");
            Ok(InfoBag::from_iter([
                ("longName", json!("Alphabet Inc.")),
                ("trailingPE", json!(24.1)),
            ]))
        });
        let fetcher = Arc::new(SnapshotFetcher::new(Arc::new(market), Duration::from_secs(5)));

        let llm = Arc::new(ScriptedProvider::with_responses(vec![
            tool_use_response("call_0", "get_financial_data", json!({"ticker": "GOOGL"})),
            text_response("Alphabet trades at 24x trailing earnings."),
        ]));
        let runtime = AgentRuntime::builder().provider(llm.clone()).build().unwrap();
        let analyst = FundamentalAnalyst::new(&runtime, &StockConfig::default(), fetcher);

        let sink = Arc::new(VecSink::new());
        let mut ctx = Context::new().with_event_sink(sink.clone());
        let report = analyst.process("GOOGL".to_string(), &mut ctx).await.unwrap();

        assert_eq!(report, "Alphabet trades at 24x trailing earnings.");

        let requests = llm.requests();
        assert_eq!(requests[0].model, "gemini-2.5-flash");
        let tools = requests[0].tools.as_ref().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "get_financial_data");
        assert!(requests[0].builtin_tools.is_none());

        let result = sink
            .events()
            .into_iter()
            .find_map(|e| match e {
                AgentEvent::ToolResult { output, is_error, .. } => Some((output, is_error)),
                _ => None,
            })
            .unwrap();
        assert!(!result.1);
        assert_eq!(result.0["company_name"], "Alphabet Inc.");
    }
}
