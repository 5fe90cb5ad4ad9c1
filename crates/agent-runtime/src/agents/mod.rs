//! Concrete agent implementations
//!
//! This module provides concrete implementations of the Agent trait:
//! - SimpleAgent: LLM-only agent without tool execution
//! - ToolAgent: Agent with LLM loop and tool execution capabilities
//! - DelegatingAgent: Agent that routes to sub-agents based on custom logic
//! - AgentTool: adapter exposing an agent as a callable tool

pub mod agent_tool;
pub mod delegating;
pub mod simple;
pub mod tool;

pub use agent_tool::AgentTool;
pub use delegating::{Delegation, DelegatingAgent, DelegatingAgentBuilder};
pub use simple::{SimpleAgent, SimpleConfig};
pub use tool::ToolAgent;
