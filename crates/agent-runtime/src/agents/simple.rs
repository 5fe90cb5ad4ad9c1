//! Simple agent implementation (LLM only, no tools)

use agent_core::{Agent, AgentEvent, Context, Result};
use agent_llm::{CompletionRequest, LLMProvider, Message};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_tokens: 8192,
            temperature: 0.7,
        }
    }
}

/// A simple agent that uses LLM without tools
///
/// SimpleAgent performs a single model turn: the system prompt plus the
/// input, returning the model's text. Reasoning summaries and the answer are
/// reported on the context's event sink.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{SimpleAgent, SimpleConfig};
/// use agent_core::{Agent, Context};
/// use agent_llm::providers::GeminiProvider;
/// use std::sync::Arc;
///
/// # async fn example() -> agent_core::Result<()> {
/// let provider = Arc::new(GeminiProvider::from_env()?);
/// let config = SimpleConfig {
///     model: "gemini-2.5-pro".to_string(),
///     system_prompt: "You write Terraform.".to_string(),
///     max_tokens: 4096,
///     temperature: 0.2,
/// };
///
/// let agent = SimpleAgent::new(provider, config, "terraform_config_gen".to_string());
/// let mut context = Context::new();
/// let response = agent.process("A GCS bucket".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct SimpleAgent {
    provider: Arc<dyn LLMProvider>,
    config: SimpleConfig,
    name: String,
    description: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    ///
    /// # Arguments
    ///
    /// * `provider` - The LLM provider to use
    /// * `config` - Configuration for the agent
    /// * `name` - Name of the agent
    pub fn new(provider: Arc<dyn LLMProvider>, config: SimpleConfig, name: String) -> Self {
        Self {
            provider,
            config,
            name,
            description: String::new(),
        }
    }

    /// Set the description shown to delegating agents
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(input)])
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self.provider.complete(request).await?;
        info!(
            agent = %self.name,
            model = %self.config.model,
            output_tokens = response.usage.output_tokens,
            "Simple agent completed"
        );

        for thought in response.message.thoughts() {
            context.emit(AgentEvent::Thought {
                agent: self.name.clone(),
                text: thought.to_string(),
            });
        }

        let text = response
            .message
            .text()
            .unwrap_or_else(|| "No response".to_string());
        context.emit(AgentEvent::Text {
            agent: self.name.clone(),
            text: text.clone(),
        });

        Ok(text)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::VecSink;
    use agent_llm::testing::{ScriptedProvider, thinking_response};

    #[test]
    fn test_simple_config_default() {
        let config = SimpleConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.max_tokens, 8192);
    }

    #[tokio::test]
    async fn test_single_turn() {
        let provider = Arc::new(ScriptedProvider::with_responses(vec![thinking_response(
            "a bucket needs a name",
            "resource \"google_storage_bucket\" \"b\" {}",
        )]));
        let config = SimpleConfig {
            system_prompt: "Write HCL".to_string(),
            ..SimpleConfig::default()
        };
        let agent = SimpleAgent::new(provider.clone(), config, "writer".to_string())
            .with_description("writes HCL");
        let sink = Arc::new(VecSink::new());
        let mut ctx = Context::new().with_event_sink(sink.clone());

        let out = agent.process("bucket".to_string(), &mut ctx).await.unwrap();
        assert!(out.starts_with("resource"));
        assert_eq!(agent.description(), "writes HCL");

        let request = &provider.requests()[0];
        assert_eq!(request.system.as_deref(), Some("Write HCL"));
        assert!(request.tools.is_none());

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AgentEvent::Thought { agent, .. } if agent == "writer"));
        assert!(matches!(&events[1], AgentEvent::Text { .. }));
    }
}
