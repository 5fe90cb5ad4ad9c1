//! Agent runtime for executing agents with dependency injection
//!
//! This crate provides the runtime infrastructure for executing agents,
//! including the AgentExecutor for LLM loops, AgentRuntime for dependency
//! management, concrete agent implementations, in-memory sessions and a
//! Runner that streams run events.

pub mod agents;
pub mod executor;
pub mod runner;
pub mod runtime;
pub mod session;

// Re-export key types
pub use agents::{
    AgentTool, Delegation, DelegatingAgent, DelegatingAgentBuilder, SimpleAgent, SimpleConfig,
    ToolAgent,
};
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};
pub use runner::{EventStream, Runner};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
pub use session::{InMemorySessionService, Session, SessionError};
