//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;

/// An agent that uses the LLM loop with tool execution
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface
/// while supporting tool execution in an LLM loop.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, ExecutorConfig};
/// use agent_core::{Agent, Context};
/// use agent_llm::providers::GeminiProvider;
/// use std::sync::Arc;
///
/// # async fn example() -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(Arc::new(GeminiProvider::from_env()?))
///     .build()?;
///
/// let agent = runtime.create_tool_agent(ExecutorConfig::default(), "researcher");
///
/// let mut context = Context::new();
/// let response = agent.process("Analyze MSFT".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
    description: String,
}

impl ToolAgent {
    /// Create a new tool agent
    ///
    /// # Arguments
    ///
    /// * `executor` - The agent executor to wrap
    /// * `name` - Name of the agent
    pub fn new(executor: AgentExecutor, name: String) -> Self {
        Self {
            executor,
            name,
            description: String::new(),
        }
    }

    /// Create a tool agent from parts
    pub fn from_parts(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self::new(executor, name.into())
    }

    /// Set the description shown to delegating agents
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.executor.run(&self.name, input, context).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
