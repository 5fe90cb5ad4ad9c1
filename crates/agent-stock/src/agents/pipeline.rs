//! Fixed-order research pipeline (pipeline mode)

use agent_core::{Agent, AgentEvent, Context, Result};
use agent_runtime::{AgentRuntime, SimpleAgent, SimpleConfig};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::AnalystTeam;
use crate::config::StockConfig;
use crate::error::StockError;
use crate::fetcher::SnapshotFetcher;
use crate::prompts::{self, CHIEF_INVESTMENT_OFFICER, chief_investment_officer_synthesis_instruction};
use crate::ticker::TickerExtractor;

const PIPELINE_NAME: &str = "ResearchPipeline";

/// Runs the analysts in a fixed order, then has the CIO model synthesize
///
/// 1. fetch the snapshot to learn the company name and industry
/// 2. FundamentalAnalyst with the ticker
/// 3. MarketSentimentAnalyst with the company name
/// 4. EconomicAndIndustryAnalyst with the company name and industry
/// 5. CIO synthesis over the three reports
pub struct ResearchPipeline {
    team: AnalystTeam,
    fetcher: Arc<SnapshotFetcher>,
    synthesizer: SimpleAgent,
    tickers: TickerExtractor,
}

impl ResearchPipeline {
    pub fn new(
        runtime: &AgentRuntime,
        config: &StockConfig,
        team: AnalystTeam,
        fetcher: Arc<SnapshotFetcher>,
    ) -> Result<Self> {
        let synthesizer = runtime.create_simple_agent(
            SimpleConfig {
                model: config.cio_model.clone(),
                system_prompt: chief_investment_officer_synthesis_instruction(),
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
            CHIEF_INVESTMENT_OFFICER,
        );

        Ok(Self {
            team,
            fetcher,
            synthesizer,
            tickers: TickerExtractor::new()?,
        })
    }

    async fn consult(
        &self,
        analyst: &Arc<dyn Agent>,
        request: String,
        reason: &str,
        ctx: &Context,
    ) -> Result<String> {
        ctx.emit(AgentEvent::Delegated {
            agent: PIPELINE_NAME.to_string(),
            target: analyst.name().to_string(),
            reason: reason.to_string(),
        });
        let mut child = ctx.child();
        analyst.process(request, &mut child).await
    }
}

#[async_trait]
impl Agent for ResearchPipeline {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let ticker = self.tickers.extract(&input).ok_or_else(|| {
            StockError::InvalidSymbol(format!("no ticker symbol found in request: {input}"))
        })?;
        info!(ticker = %ticker, "Research pipeline started");

        let start = Instant::now();
        let call_id = format!("pipeline_{ticker}");
        context.emit(AgentEvent::ToolCall {
            agent: PIPELINE_NAME.to_string(),
            id: call_id.clone(),
            tool: "get_financial_data".to_string(),
            input: json!({ "ticker": ticker }),
        });
        let snapshot = self.fetcher.fetch(&ticker).await;
        context.emit(AgentEvent::ToolResult {
            agent: PIPELINE_NAME.to_string(),
            id: call_id,
            tool: "get_financial_data".to_string(),
            output: serde_json::to_value(&snapshot).unwrap_or_default(),
            is_error: false,
            duration_ms: start.elapsed().as_millis() as u64,
        });

        let company = snapshot.company_name().unwrap_or(&ticker).to_string();
        let industry = snapshot.industry();

        let fundamental = self
            .consult(
                &self.team.fundamental,
                prompts::fundamental_request(&ticker),
                "financial health from the stock ticker",
                context,
            )
            .await?;
        let sentiment = self
            .consult(
                &self.team.sentiment,
                prompts::sentiment_request(&company),
                "public perception and news for the company",
                context,
            )
            .await?;
        let economic = self
            .consult(
                &self.team.economic,
                prompts::economic_request(&company, industry),
                "industry and macroeconomic context",
                context,
            )
            .await?;

        info!(ticker = %ticker, "Analyst reports collected; synthesizing thesis");
        let message = prompts::synthesis_request(&input, &fundamental, &sentiment, &economic);
        self.synthesizer.process(message, context).await
    }

    fn name(&self) -> &str {
        PIPELINE_NAME
    }

    fn description(&self) -> &str {
        "Consults the fundamental, sentiment and industry analysts in order, then synthesizes an investment thesis."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{InfoBag, MockMarketDataProvider};
    use agent_core::VecSink;
    use agent_llm::testing::{ScriptedProvider, text_response};
    use std::time::Duration;

    fn pipeline(llm: Arc<ScriptedProvider>, market: MockMarketDataProvider) -> ResearchPipeline {
        let runtime = AgentRuntime::builder().provider(llm).build().unwrap();
        let config = StockConfig::default();
        let fetcher = Arc::new(SnapshotFetcher::new(Arc::new(market), Duration::from_secs(5)));
        let team = AnalystTeam::new(&runtime, &config, fetcher.clone());
        ResearchPipeline::new(&runtime, &config, team, fetcher).unwrap()
    }

    #[tokio::test]
    async fn test_runs_analysts_in_order() {
        let mut market = MockMarketDataProvider::new();
        market.expect_ticker_info().times(1).returning(|_| {
            Ok(InfoBag::from_iter([
                ("longName", json!("Alphabet Inc.")),
                ("industry", json!("Internet Content & Information")),
            ]))
        });
        let llm = Arc::new(ScriptedProvider::with_responses(vec![
            text_response("F report"),
            text_response("S report"),
            text_response("E report"),
            text_response("Final thesis"),
        ]));
        let pipeline = pipeline(llm.clone(), market);

        let sink = Arc::new(VecSink::new());
        let mut ctx = Context::new().with_event_sink(sink.clone());
        let out = pipeline
            .process(
                "Should I invest in Google (GOOGL) for the long term?".to_string(),
                &mut ctx,
            )
            .await
            .unwrap();

        assert_eq!(out, "Final thesis");

        let requests = llm.requests();
        assert_eq!(requests.len(), 4);
        let user_text = |i: usize| requests[i].messages[0].text().unwrap_or_default();
        assert!(user_text(0).contains("GOOGL"));
        assert!(user_text(1).contains("Alphabet Inc."));
        assert!(user_text(2).contains("Internet Content & Information"));
        assert!(user_text(3).contains("F report"));
        assert!(user_text(3).contains("E report"));
        assert_eq!(requests[3].model, "gemini-2.5-pro");

        let targets: Vec<String> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                AgentEvent::Delegated { target, .. } => Some(target),
                _ => None,
            })
            .collect();
        assert_eq!(
            targets,
            vec![
                "FundamentalAnalyst",
                "MarketSentimentAnalyst",
                "EconomicAndIndustryAnalyst"
            ]
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_ticker_when_snapshot_fails() {
        let mut market = MockMarketDataProvider::new();
        market
            .expect_ticker_info()
            .returning(|s| Err(StockError::InvalidSymbol(s.to_string())));
        let llm = Arc::new(ScriptedProvider::with_responses(vec![
            text_response("F"),
            text_response("S"),
            text_response("E"),
            text_response("T"),
        ]));
        let pipeline = pipeline(llm.clone(), market);

        let mut ctx = Context::new();
        pipeline
            .process("Thoughts on $nvda?".to_string(), &mut ctx)
            .await
            .unwrap();

        let sentiment_request = llm.requests()[1].messages[0].text().unwrap_or_default();
        assert!(sentiment_request.contains("NVDA"));
    }

    #[tokio::test]
    async fn test_request_without_ticker_fails_before_any_call() {
        let mut market = MockMarketDataProvider::new();
        market.expect_ticker_info().never();
        let llm = Arc::new(ScriptedProvider::new());
        let pipeline = pipeline(llm.clone(), market);

        let mut ctx = Context::new();
        let result = pipeline
            .process("Should I buy something?".to_string(), &mut ctx)
            .await;

        assert!(result.is_err());
        assert!(llm.requests().is_empty());
    }
}
