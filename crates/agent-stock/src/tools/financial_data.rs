//! Tool for fetching a company's financial snapshot

use agent_core::{Error, Result as AgentResult};
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::fetcher::SnapshotFetcher;

const TOOL_NAME: &str = "get_financial_data";

/// Exposes [`SnapshotFetcher`] to agents as `get_financial_data`
///
/// A failed lookup is still a successful tool call: the returned snapshot
/// carries the error text for the model to read.
pub struct FinancialDataTool {
    fetcher: Arc<SnapshotFetcher>,
}

#[derive(Debug, Deserialize)]
struct FinancialDataParams {
    ticker: String,
}

impl FinancialDataTool {
    /// Create a new financial data tool
    pub fn new(fetcher: Arc<SnapshotFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Tool for FinancialDataTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: FinancialDataParams =
            serde_json::from_value(params).map_err(|e| Error::InvalidToolInput {
                tool: TOOL_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let ticker = params.ticker.trim();
        if ticker.is_empty() {
            return Err(Error::InvalidToolInput {
                tool: TOOL_NAME.to_string(),
                reason: "ticker must not be empty".to_string(),
            });
        }

        let snapshot = self.fetcher.fetch(ticker).await;
        serde_json::to_value(snapshot)
            .map_err(|e| Error::ProcessingFailed(format!("Failed to encode snapshot: {e}")))
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Retrieves key financial data for a given stock ticker. \
         Returns company name, sector, industry, market cap, trailing and forward P/E, \
         dividend yield, price to book, 52-week range, average volume and a business summary. \
         On failure only the `error` field is set."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("The stock ticker symbol (e.g., 'GOOGL', 'MSFT')."),
            }),
            vec!["ticker"],
        )
    }

    fn output_schema(&self) -> Option<Value> {
        let text = |d: &str| schema::nullable(schema::string(d));
        let number = |d: &str| schema::nullable(schema::number(d));

        Some(json!({
            "type": "object",
            "properties": {
                "company_name": text("Company long name"),
                "sector": text("Sector"),
                "industry": text("Industry"),
                "market_cap": number("Market capitalization"),
                "pe_ratio": number("Trailing price/earnings ratio"),
                "forward_pe": number("Forward price/earnings ratio"),
                "dividend_yield": number("Dividend yield as a fraction"),
                "price_to_book": number("Price to book ratio"),
                "fifty_two_week_high": number("52-week high"),
                "fifty_two_week_low": number("52-week low"),
                "average_volume": schema::nullable(schema::integer("Average daily volume")),
                "short_summary": text("Business summary"),
                "error": text("Set only when the data could not be retrieved"),
            },
        }))
    }
}
