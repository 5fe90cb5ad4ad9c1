//! Tool definition types for LLM tool use

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition for LLM provider
///
/// This describes a tool that the LLM can use, including its name,
/// description, and input schema in JSON Schema format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in ToolRegistry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,

    /// JSON schema describing the tool's result, when it has a fixed shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema: None,
        }
    }

    /// Attach a result schema
    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }
}

/// Tools executed by the provider itself rather than by the agent runtime
///
/// These carry no schema; the provider decides when to use them and folds
/// their results into the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTool {
    /// Grounded Google web search
    GoogleSearch,
}

impl BuiltinTool {
    /// Name the tool is registered under
    pub fn name(self) -> &'static str {
        match self {
            BuiltinTool::GoogleSearch => "google_search",
        }
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{json, Value};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use agent_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "query": schema::string("Search query"),
    ///         "limit": schema::number("Maximum results"),
    ///     }),
    ///     vec!["query"],
    /// );
    /// ```
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    ///
    /// # Example
    ///
    /// ```
    /// use agent_llm::tools::schema;
    ///
    /// let schema = schema::string("A text description");
    /// ```
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Number property schema
    ///
    /// # Example
    ///
    /// ```
    /// use agent_llm::tools::schema;
    ///
    /// let schema = schema::number("A numeric value");
    /// ```
    pub fn number(description: &str) -> Value {
        json!({
            "type": "number",
            "description": description,
        })
    }

    /// Integer property schema
    pub fn integer(description: &str) -> Value {
        json!({
            "type": "integer",
            "description": description,
        })
    }

    /// Boolean property schema
    pub fn boolean(description: &str) -> Value {
        json!({
            "type": "boolean",
            "description": description,
        })
    }

    /// Nullable property schema (the value may be absent)
    pub fn nullable(schema: Value) -> Value {
        let mut schema = schema;
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("nullable".to_string(), Value::Bool(true));
        }
        schema
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let schema = schema::object(
            json!({
                "query": schema::string("Search query"),
            }),
            vec!["query"],
        );

        let tool = ToolDefinition::new("search", "Search the web", schema.clone());
        assert_eq!(tool.name, "search");
        assert_eq!(tool.description, "Search the web");
        assert_eq!(tool.input_schema, schema);
        assert!(tool.output_schema.is_none());
    }

    #[test]
    fn test_output_schema_and_nullable() {
        let out = schema::object(
            json!({ "pe_ratio": schema::nullable(schema::number("Trailing P/E")) }),
            vec![],
        );
        let tool = ToolDefinition::new("quote", "Fetch a quote", json!({"type": "object"}))
            .with_output_schema(out.clone());

        assert_eq!(tool.output_schema, Some(out));
        assert_eq!(
            tool.output_schema.unwrap()["properties"]["pe_ratio"]["nullable"],
            true
        );
    }

    #[test]
    fn test_builtin_tool_name() {
        assert_eq!(BuiltinTool::GoogleSearch.name(), "google_search");
    }

    #[test]
    fn test_schema_builders() {
        let str_schema = schema::string("test");
        assert_eq!(str_schema["type"], "string");

        let num_schema = schema::number("count");
        assert_eq!(num_schema["type"], "number");

        let bool_schema = schema::boolean("flag");
        assert_eq!(bool_schema["type"], "boolean");
    }
}
