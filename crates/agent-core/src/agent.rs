//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// Agents exchange plain strings. Concrete implementations that talk to a
/// model use `agent_llm::Message` internally.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    ///
    /// The input/output types are intentionally kept as String for maximum
    /// flexibility. Concrete implementations can parse/format as needed.
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// Short description of what the agent does
    ///
    /// Used as the tool description when the agent is exposed to another
    /// agent as a callable tool.
    fn description(&self) -> &str {
        ""
    }

    /// Initialize the agent (optional)
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Shutdown the agent (optional)
    async fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
