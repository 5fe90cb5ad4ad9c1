//! Tool trait definition

use agent_core::{Context, Result};
use agent_llm::{BuiltinTool, ToolDefinition};
use async_trait::async_trait;
use serde_json::Value;

/// How a tool is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Executed locally by the agent runtime
    Function,
    /// Executed by the model provider; never dispatched locally
    Builtin(BuiltinTool),
}

/// Trait for tools that agents can execute
///
/// Tools are functions that LLM agents can call to interact with the world.
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Execute with access to the caller's context
    ///
    /// Tools that run nested agents override this to share the event sink and
    /// caller identity. The default ignores the context.
    async fn execute_with_context(&self, params: Value, _ctx: &mut Context) -> Result<Value> {
        self.execute(params).await
    }

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and match the name in ToolDefinition
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// Describes the parameters this tool expects. The LLM uses this schema
    /// to generate valid tool calls.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a quote lookup tool:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string" }
    ///     },
    ///     "required": ["ticker"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;

    /// Schema of the value `execute` returns, when it has a fixed shape
    fn output_schema(&self) -> Option<Value> {
        None
    }

    /// Execution kind (defaults to a local function)
    fn kind(&self) -> ToolKind {
        ToolKind::Function
    }

    /// Definition sent to the model
    fn definition(&self) -> ToolDefinition {
        let def = ToolDefinition::new(self.name(), self.description(), self.input_schema());
        match self.output_schema() {
            Some(schema) => def.with_output_schema(schema),
            None => def,
        }
    }
}
