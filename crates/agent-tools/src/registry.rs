//! Tool registry for managing available tools

use crate::{Tool, ToolKind};
use agent_llm::{BuiltinTool, ToolDefinition};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

/// Errors raised by [`ToolRegistry`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with this name is already registered
    #[error("tool '{0}' is already registered")]
    Duplicate(String),
}

/// Registry for managing tools
///
/// Names are unique; `register` replaces, `try_register` refuses.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        if tools.insert(name.clone(), tool).is_some() {
            debug!(tool_name = %name, "Replaced registered tool");
        }
    }

    /// Register a tool, failing if the name is taken
    pub fn try_register(&self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        let name = tool.name().to_string();
        if tools.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// List all registered tools
    ///
    /// Returns a vector of all tools in the registry, ordered by name.
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<Arc<dyn Tool>> = tools.values().cloned().collect();
        list.sort_by(|a, b| a.name().cmp(b.name()));
        list
    }

    /// Definitions of locally executed tools, ordered by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools()
            .iter()
            .filter(|t| t.kind() == ToolKind::Function)
            .map(|t| t.definition())
            .collect()
    }

    /// Provider-executed tools present in the registry
    pub fn builtin_tools(&self) -> Vec<BuiltinTool> {
        self.list_tools()
            .iter()
            .filter_map(|t| match t.kind() {
                ToolKind::Builtin(b) => Some(b),
                ToolKind::Function => None,
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }
}
