//! Runtime for executing agents with dependency injection
//!
//! The AgentRuntime manages shared resources like LLM providers and tool registries,
//! and provides factory methods for creating different types of agents.

use agent_core::Result;
use agent_llm::LLMProvider;
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::debug;

use crate::agents::{SimpleAgent, SimpleConfig, ToolAgent};
use crate::executor::{AgentExecutor, ExecutorConfig};

/// Configuration for the agent runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: "gemini-2.5-flash".to_string(),
        }
    }
}

/// Runtime for executing agents with dependency injection
///
/// The AgentRuntime manages shared resources (LLM provider, tool registry)
/// and provides factory methods for creating different types of agents.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, SimpleConfig, ExecutorConfig};
/// use agent_llm::providers::GeminiProvider;
/// use std::sync::Arc;
///
/// # async fn example() -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(Arc::new(GeminiProvider::from_env()?))
///     .build()?;
///
/// // Create a simple agent
/// let simple_agent = runtime.create_simple_agent(SimpleConfig::default(), "assistant");
///
/// // Create a tool-using agent
/// let tool_agent = runtime.create_tool_agent(ExecutorConfig::default(), "researcher");
/// # Ok(())
/// # }
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    /// Create a new agent runtime
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get a reference to the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Executor configuration seeded from the runtime defaults
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            max_iterations: self.config.default_max_iterations,
            model: self.config.default_model.clone(),
            ..ExecutorConfig::default()
        }
    }

    /// Create a simple agent (LLM only, no tools)
    pub fn create_simple_agent(
        &self,
        config: SimpleConfig,
        name: impl Into<String>,
    ) -> SimpleAgent {
        SimpleAgent::new(self.provider.clone(), config, name.into())
    }

    /// Create a tool-using agent over the runtime's shared registry
    pub fn create_tool_agent(&self, config: ExecutorConfig, name: impl Into<String>) -> ToolAgent {
        self.create_tool_agent_with_tools(config, name, self.tool_registry.clone())
    }

    /// Create a tool-using agent with its own registry
    ///
    /// Each agent sees exactly the capabilities in `registry`.
    pub fn create_tool_agent_with_tools(
        &self,
        config: ExecutorConfig,
        name: impl Into<String>,
        registry: Arc<ToolRegistry>,
    ) -> ToolAgent {
        let name = name.into();
        debug!(agent = %name, tools = ?registry.names(), "Creating tool agent");
        let executor = AgentExecutor::new(self.provider.clone(), registry, config);
        ToolAgent::new(executor, name)
    }
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default max iterations
    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not set
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        let tool_registry = self
            .tool_registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));

        Ok(AgentRuntime::new(provider, tool_registry, self.config))
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
