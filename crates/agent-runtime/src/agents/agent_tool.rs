//! Agent-as-tool adapter
//!
//! Exposes an [`Agent`] to another agent's model as a callable function
//! taking `{"request": string}` and returning `{"result": string}`.

use agent_core::{Agent, Context, Error, Result};
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Wraps an agent so it can be registered in a `ToolRegistry`
///
/// The tool takes the wrapped agent's name and description. With a caller
/// context the agent runs in `ctx.child()`, sharing the event sink and
/// caller identity but not the caller's data.
pub struct AgentTool {
    agent: Arc<dyn Agent>,
}

impl AgentTool {
    /// Wrap an agent
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    /// The wrapped agent
    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    fn request_from(&self, params: &Value) -> Result<String> {
        params
            .get("request")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidToolInput {
                tool: self.agent.name().to_string(),
                reason: "missing string field 'request'".to_string(),
            })
    }

    async fn run(&self, params: Value, ctx: &mut Context) -> Result<Value> {
        let request = self.request_from(&params)?;
        debug!(agent = %self.agent.name(), "Invoking agent as tool");
        let result = self.agent.process(request, ctx).await?;
        Ok(json!({ "result": result }))
    }
}

#[async_trait]
impl Tool for AgentTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let mut ctx = Context::new();
        self.run(params, &mut ctx).await
    }

    async fn execute_with_context(&self, params: Value, ctx: &mut Context) -> Result<Value> {
        let mut child = ctx.child();
        self.run(params, &mut child).await
    }

    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "request": schema::string("The request for this agent") }),
            vec!["request"],
        )
    }

    fn output_schema(&self) -> Option<Value> {
        Some(schema::object(
            json!({ "result": schema::string("The agent's response") }),
            vec!["result"],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentEvent, VecSink};

    struct Recorder;

    #[async_trait]
    impl Agent for Recorder {
        async fn process(&self, input: String, context: &mut Context) -> Result<String> {
            context.emit(AgentEvent::Text {
                agent: "Recorder".to_string(),
                text: input.clone(),
            });
            let saw_parent_data = context.contains_key("parent.secret");
            Ok(format!("{input}|{saw_parent_data}|{:?}", context.session_id()))
        }

        fn name(&self) -> &str {
            "Recorder"
        }

        fn description(&self) -> &str {
            "Records requests"
        }
    }

    #[tokio::test]
    async fn test_runs_in_child_context() {
        let tool = AgentTool::new(Arc::new(Recorder));
        let sink = Arc::new(VecSink::new());
        let mut ctx = Context::new()
            .with_session_id("s-1")
            .with_event_sink(sink.clone());
        ctx.insert("parent.secret", json!(1));

        let out = tool
            .execute_with_context(json!({"request": "analyze"}), &mut ctx)
            .await
            .unwrap();

        assert_eq!(out, json!({"result": "analyze|false|Some(\"s-1\")"}));
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test]
    async fn test_contract() {
        let tool = AgentTool::new(Arc::new(Recorder));
        assert_eq!(tool.name(), "Recorder");
        assert_eq!(tool.description(), "Records requests");
        assert_eq!(tool.input_schema()["required"], json!(["request"]));
        assert!(tool.output_schema().is_some());

        let err = tool.execute(json!({"query": "x"})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidToolInput { .. }));
    }
}
