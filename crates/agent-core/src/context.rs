//! Execution context for agents
//!
//! The `Context` struct provides a flexible key-value store for passing
//! runtime configuration and state to agents during execution, plus the
//! event sink that every agent in a run reports to.

use crate::event::{AgentEvent, EventSink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Well-known context keys for common configuration
pub mod keys {
    /// User ID for personalization
    pub const USER_ID: &str = "user_id";
    /// Session ID for tracking
    pub const SESSION_ID: &str = "session_id";
    /// Application name the session belongs to
    pub const APP_NAME: &str = "app_name";
}

/// Keys copied into a delegation context by [`Context::child`]
const INHERITED_KEYS: [&str; 3] = [keys::USER_ID, keys::SESSION_ID, keys::APP_NAME];

/// Context passed to agents during execution
///
/// Context provides a flexible way to pass configuration and state to agents.
/// It supports both untyped JSON values and typed accessors for common fields.
///
/// # Example
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new()
///     .with_user_id("test_user")
///     .with_session_id("session-123");
///
/// assert_eq!(ctx.user_id(), Some("test_user"));
/// assert_eq!(ctx.session_id(), Some("session-123"));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    /// Key-value storage for context data
    data: HashMap<String, serde_json::Value>,
    /// Where agents report run events
    sink: Option<Arc<dyn EventSink>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("data", &self.data)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    // =========== Builder Methods ===========

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.insert(keys::SESSION_ID, serde_json::json!(session_id.into()));
        self
    }

    /// Set the user ID
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.insert(keys::USER_ID, serde_json::json!(user_id.into()));
        self
    }

    /// Set the application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.insert(keys::APP_NAME, serde_json::json!(app_name.into()));
        self
    }

    /// Attach an event sink
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // =========== Common Accessors ===========

    /// Get the session ID
    pub fn session_id(&self) -> Option<&str> {
        self.get(keys::SESSION_ID).and_then(|v| v.as_str())
    }

    /// Get the user ID
    pub fn user_id(&self) -> Option<&str> {
        self.get(keys::USER_ID).and_then(|v| v.as_str())
    }

    /// Get the application name
    pub fn app_name(&self) -> Option<&str> {
        self.get(keys::APP_NAME).and_then(|v| v.as_str())
    }

    // =========== Events ===========

    /// Report an event to the attached sink, if any
    pub fn emit(&self, event: AgentEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(event);
        }
    }

    /// Whether an event sink is attached
    pub fn has_event_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Derive the context handed to a delegated sub-agent
    ///
    /// The child shares the event sink and the session identity but starts
    /// with no other data, so sub-agents cannot see or clobber the caller's
    /// working state.
    pub fn child(&self) -> Self {
        let data = INHERITED_KEYS
            .iter()
            .filter_map(|key| {
                self.data
                    .get(*key)
                    .map(|value| ((*key).to_string(), value.clone()))
            })
            .collect();

        Self {
            data,
            sink: self.sink.clone(),
        }
    }

    // =========== Generic Key-Value Operations ===========

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    ///
    /// Serializes the value to JSON before storing.
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    ///
    /// Deserializes the JSON value into the specified type.
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Remove a value from the context
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
