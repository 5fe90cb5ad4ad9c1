//! Events emitted while agents run
//!
//! A run produces a sequence of events: model reasoning, tool invocations,
//! tool results, text and finally a response or an error. Every event names
//! the agent that authored it, so delegated sub-agent activity can be told
//! apart from the root agent's own output.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;

/// A single event in an agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Model reasoning summary
    Thought {
        /// Authoring agent
        agent: String,
        /// Reasoning text
        text: String,
    },

    /// A tool invocation requested by the model
    ToolCall {
        /// Authoring agent
        agent: String,
        /// Tool use id
        id: String,
        /// Tool name
        tool: String,
        /// Tool input
        input: Value,
    },

    /// The outcome of a tool invocation
    ToolResult {
        /// Authoring agent
        agent: String,
        /// Tool use id this result answers
        id: String,
        /// Tool name
        tool: String,
        /// Tool output, or the error message when `is_error` is set
        output: Value,
        /// Whether the tool failed
        is_error: bool,
        /// Wall-clock execution time
        duration_ms: u64,
    },

    /// Text produced by a model turn
    Text {
        /// Authoring agent
        agent: String,
        /// Text content
        text: String,
    },

    /// A routing decision handing the request to a sub-agent
    Delegated {
        /// Delegating agent
        agent: String,
        /// Selected sub-agent
        target: String,
        /// Why the target was chosen
        reason: String,
    },

    /// Final response of the run
    Final {
        /// Root agent
        agent: String,
        /// Response text
        text: String,
    },

    /// The run failed
    Error {
        /// Agent that failed
        agent: String,
        /// Error message
        message: String,
    },
}

impl AgentEvent {
    /// Name of the agent that authored this event
    pub fn agent(&self) -> &str {
        match self {
            Self::Thought { agent, .. }
            | Self::ToolCall { agent, .. }
            | Self::ToolResult { agent, .. }
            | Self::Text { agent, .. }
            | Self::Delegated { agent, .. }
            | Self::Final { agent, .. }
            | Self::Error { agent, .. } => agent,
        }
    }

    /// Whether this event ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Final { .. } | Self::Error { .. })
    }
}

/// Receiver for agent events
///
/// Sinks are shared across every agent taking part in a run, so `emit`
/// takes `&self` and must not block.
pub trait EventSink: Send + Sync {
    /// Deliver one event
    fn emit(&self, event: AgentEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: AgentEvent) {}
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct VecSink {
    events: Mutex<Vec<AgentEvent>>,
}

impl VecSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<AgentEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for VecSink {
    fn emit(&self, event: AgentEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialization_tag() {
        let event = AgentEvent::ToolCall {
            agent: "FundamentalAnalyst".to_string(),
            id: "call_0".to_string(),
            tool: "get_financial_data".to_string(),
            input: json!({"ticker": "GOOGL"}),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "tool_call");
        assert_eq!(value["tool"], "get_financial_data");
        assert_eq!(event.agent(), "FundamentalAnalyst");
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_terminal_events() {
        let done = AgentEvent::Final {
            agent: "root".to_string(),
            text: "ok".to_string(),
        };
        let failed = AgentEvent::Error {
            agent: "root".to_string(),
            message: "boom".to_string(),
        };
        assert!(done.is_terminal());
        assert!(failed.is_terminal());
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let sink = VecSink::new();
        sink.emit(AgentEvent::Thought {
            agent: "a".to_string(),
            text: "first".to_string(),
        });
        sink.emit(AgentEvent::Text {
            agent: "a".to_string(),
            text: "second".to_string(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], AgentEvent::Thought { .. }));
        assert!(matches!(events[1], AgentEvent::Text { .. }));
    }
}
