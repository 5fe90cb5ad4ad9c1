//! Google web search, executed by the model provider

use agent_core::{Error, Result as AgentResult};
use agent_llm::BuiltinTool;
use agent_tools::{Tool, ToolKind};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Grants an agent grounded Google search
///
/// The search runs on the provider side and its results are folded into the
/// model's answer, so the registry never dispatches this tool locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSearchTool;

impl WebSearchTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, _params: Value) -> AgentResult<Value> {
        Err(Error::ProcessingFailed(format!(
            "{} is executed by the model provider",
            self.name()
        )))
    }

    fn name(&self) -> &str {
        BuiltinTool::GoogleSearch.name()
    }

    fn description(&self) -> &str {
        "Searches the web with Google for recent news, analyst ratings and industry information."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object"})
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Builtin(BuiltinTool::GoogleSearch)
    }
}
