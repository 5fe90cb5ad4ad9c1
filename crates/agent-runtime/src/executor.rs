//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history, function tools and built-in tools
//! 2. Report reasoning and text through the context's event sink
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response

use agent_core::{AgentEvent, Context, Result};
use agent_llm::{CompletionRequest, ContentBlock, LLMProvider, Message, StopReason};
use agent_tools::{ToolKind, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Returned when the loop exhausts its iteration budget
pub const MAX_ITERATIONS_MESSAGE: &str = "Max iterations reached without completion";
/// Returned when the model stops at the token limit
pub const TRUNCATED_MESSAGE: &str = "Response truncated due to token limit";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gemini-2.5-flash".to_string(),
            system_prompt: None,
            max_tokens: 8192,
            temperature: Some(0.7),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
///
/// The AgentExecutor orchestrates the interaction between an LLM provider
/// and a tool registry, implementing the agent loop pattern. Progress is
/// reported as [`AgentEvent`]s on the context passed to [`run`](Self::run).
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a builder
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Get the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Execute the agent loop with a user query
    ///
    /// # Arguments
    ///
    /// * `agent_name` - Name recorded on emitted events
    /// * `user_message` - The user's input message
    /// * `ctx` - Caller context; receives events and is handed to tools
    ///
    /// # Returns
    ///
    /// The final response from the agent after all tool calls are complete
    pub async fn run(
        &self,
        agent_name: &str,
        user_message: String,
        ctx: &mut Context,
    ) -> Result<String> {
        self.run_with_history(agent_name, user_message, Vec::new(), ctx)
            .await
    }

    /// Execute the agent loop with conversation history
    pub async fn run_with_history(
        &self,
        agent_name: &str,
        user_message: String,
        history: Vec<Message>,
        ctx: &mut Context,
    ) -> Result<String> {
        let mut conversation = history;
        conversation.push(Message::user(user_message));

        let tools = self.tool_registry.definitions();
        let builtins = self.tool_registry.builtin_tools();
        debug!(
            agent = %agent_name,
            tool_count = tools.len(),
            builtin_count = builtins.len(),
            "Available tools"
        );

        for iteration in 1..=self.config.max_iterations {
            info!(
                agent = %agent_name,
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let mut request_builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(
                    self.config
                        .system_prompt
                        .clone()
                        .unwrap_or_else(|| "You are a helpful assistant.".to_string()),
                )
                .max_tokens(self.config.max_tokens);

            if let Some(temperature) = self.config.temperature {
                request_builder = request_builder.temperature(temperature);
            }
            request_builder = request_builder
                .tools(tools.clone())
                .builtin_tools(builtins.clone());

            info!(
                agent = %agent_name,
                model = %self.config.model,
                max_tokens = self.config.max_tokens,
                "Sending request to LLM"
            );

            let response = self.provider.complete(request_builder.build()).await?;

            info!(
                agent = %agent_name,
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            for thought in response.message.thoughts() {
                ctx.emit(AgentEvent::Thought {
                    agent: agent_name.to_string(),
                    text: thought.to_string(),
                });
            }
            let text = response.message.text();
            if let Some(text) = text.as_deref().filter(|t| !t.trim().is_empty()) {
                let preview: String = text.chars().take(300).collect();
                debug!(agent = %agent_name, response_preview = %preview, "LLM response content preview");
                ctx.emit(AgentEvent::Text {
                    agent: agent_name.to_string(),
                    text: text.to_string(),
                });
            }

            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::EndTurn | StopReason::StopSequence => {
                    let text = text.unwrap_or_else(|| "No response".to_string());
                    info!(
                        agent = %agent_name,
                        iteration,
                        response_length = text.len(),
                        "Agent completed naturally"
                    );
                    return Ok(text);
                }

                StopReason::ToolUse => {
                    let tool_results = self
                        .execute_tools(agent_name, &response.message, ctx)
                        .await;

                    if tool_results.is_empty() {
                        warn!(agent = %agent_name, "No tool calls despite ToolUse stop reason");
                        return Ok(text.unwrap_or_else(|| "No response".to_string()));
                    }

                    info!(
                        agent = %agent_name,
                        result_count = tool_results.len(),
                        "Tool execution completed, continuing agent loop"
                    );
                    conversation.extend(tool_results);
                }

                StopReason::MaxTokens => {
                    warn!(agent = %agent_name, "Hit max tokens in LLM response");
                    return Ok(TRUNCATED_MESSAGE.to_string());
                }
            }
        }

        warn!(
            agent = %agent_name,
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Ok(MAX_ITERATIONS_MESSAGE.to_string())
    }

    /// Execute tool calls from an assistant message
    ///
    /// Failures, including calls to unknown tools, become error results for
    /// the model rather than aborting the loop.
    async fn execute_tools(
        &self,
        agent_name: &str,
        message: &Message,
        ctx: &mut Context,
    ) -> Vec<Message> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                agent = %agent_name,
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            ctx.emit(AgentEvent::ToolCall {
                agent: agent_name.to_string(),
                id: id.clone(),
                tool: name.clone(),
                input: input.clone(),
            });

            let start_time = Instant::now();
            let outcome = match self.tool_registry.get(name) {
                Some(tool) if tool.kind() == ToolKind::Function => {
                    tool.execute_with_context(input.clone(), ctx).await
                }
                Some(_) => Err(agent_core::Error::ProcessingFailed(format!(
                    "Tool '{name}' is executed by the model provider"
                ))),
                None => Err(agent_core::Error::ProcessingFailed(format!(
                    "Tool not found: {name}. Available tools: {:?}",
                    self.tool_registry.names()
                ))),
            };
            let duration_ms = start_time.elapsed().as_millis() as u64;

            match outcome {
                Ok(result) => {
                    let result_str =
                        serde_json::to_string(&result).unwrap_or_else(|_| result.to_string());
                    info!(
                        agent = %agent_name,
                        tool_name = %name,
                        duration_ms,
                        result_length = result_str.len(),
                        "Tool execution succeeded"
                    );
                    ctx.emit(AgentEvent::ToolResult {
                        agent: agent_name.to_string(),
                        id: id.clone(),
                        tool: name.clone(),
                        output: result,
                        is_error: false,
                        duration_ms,
                    });
                    results.push(Message::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    warn!(
                        agent = %agent_name,
                        tool_name = %name,
                        duration_ms,
                        error = %e,
                        "Tool execution failed"
                    );
                    ctx.emit(AgentEvent::ToolResult {
                        agent: agent_name.to_string(),
                        id: id.clone(),
                        tool: name.clone(),
                        output: Value::String(e.to_string()),
                        is_error: true,
                        duration_ms,
                    });
                    results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                }
            }
        }

        results
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
