//! Google Gemini provider implementation
//!
//! Implements [`LLMProvider`] over the Gemini `generateContent` REST endpoint.
//! See: https://ai.google.dev/api/generate-content
//!
//! # Example
//!
//! ```no_run
//! use agent_llm::{CompletionRequest, LLMProvider, Message};
//! use agent_llm::providers::GeminiProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GOOGLE_API_KEY (and optionally GEMINI_API_BASE)
//!     let provider = GeminiProvider::from_env()?;
//!
//!     let request = CompletionRequest::builder("gemini-2.5-flash")
//!         .add_message(Message::user("Hello!"))
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

use crate::{
    BuiltinTool, CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider,
    Message, MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "GEMINI_API_BASE";

/// Configuration for the Gemini provider
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header
    pub api_key: String,

    /// Base URL, without the `/models/...` suffix
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,

    /// Ask the model to return reasoning summaries as `thought` parts
    pub include_thoughts: bool,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("include_thoughts", &self.include_thoughts)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            include_thoughts: true,
        }
    }

    /// Create config from `GOOGLE_API_KEY` and optional `GEMINI_API_BASE`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                LLMError::ConfigurationError(format!("{API_KEY_ENV} environment variable not set"))
            })?;

        let mut config = Self::new(api_key);
        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base = base;
        }
        Ok(config)
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Enable or disable reasoning summaries
    pub fn with_thoughts(mut self, include: bool) -> Self {
        self.include_thoughts = include;
        self
    }
}

/// Gemini provider
///
/// Works with any `generateContent`-capable model, e.g. `gemini-2.5-flash`
/// and `gemini-2.5-pro`.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a provider with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    fn build_request(&self, request: CompletionRequest) -> Result<GeminiRequest> {
        let (extra_system, contents) = convert_messages(request.messages)?;

        let system = match (request.system, extra_system) {
            (Some(s), Some(extra)) => Some(format!("{s}\n\n{extra}")),
            (s, extra) => s.or(extra),
        };

        let tools = convert_tools(
            request.tools.as_deref().unwrap_or_default(),
            request.builtin_tools.as_deref().unwrap_or_default(),
        );

        Ok(GeminiRequest {
            contents,
            system_instruction: system.map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart::text(text)],
            }),
            tools: if tools.is_empty() { None } else { Some(tools) },
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
                stop_sequences: request.stop_sequences,
                thinking_config: self.config.include_thoughts.then_some(ThinkingConfig {
                    include_thoughts: true,
                }),
            },
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = request.model.clone();
        let url = self.endpoint(&model);
        let body = self.build_request(request)?;

        debug!(
            contents = body.contents.len(),
            tools = body.tools.as_ref().map_or(0, Vec::len),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        parse_response(gemini_response)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Gemini wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

impl GeminiPart {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiTool {
    Functions {
        #[serde(rename = "functionDeclarations")]
        function_declarations: Vec<FunctionDeclaration>,
    },
    GoogleSearch {
        #[serde(rename = "googleSearch")]
        google_search: Map<String, Value>,
    },
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    include_thoughts: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
    #[serde(default)]
    thoughts_token_count: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Convert our history to Gemini contents
///
/// System-role messages are returned separately and folded into
/// `systemInstruction`. Tool results are sent as `functionResponse` parts,
/// which Gemini keys by function name, so names are resolved from the
/// preceding tool uses. Consecutive messages with the same role are merged
/// into a single content.
fn convert_messages(messages: Vec<Message>) -> Result<(Option<String>, Vec<GeminiContent>)> {
    let mut system_parts = Vec::new();
    let mut contents = Vec::new();
    let mut call_names: HashMap<String, String> = HashMap::new();

    for msg in messages {
        let role = match msg.role {
            Role::System => {
                if let Some(text) = msg.text() {
                    system_parts.push(text);
                }
                continue;
            }
            Role::User => "user",
            Role::Assistant => "model",
        };

        let parts = match msg.content {
            Some(MessageContent::Text(text)) => vec![GeminiPart::text(text)],
            Some(MessageContent::Blocks(blocks)) => {
                let mut parts = Vec::with_capacity(blocks.len());
                for block in blocks {
                    match block {
                        ContentBlock::Text { text } => parts.push(GeminiPart::text(text)),
                        // Reasoning summaries are output only
                        ContentBlock::Thinking { .. } => {}
                        ContentBlock::ToolUse { id, name, input } => {
                            call_names.insert(id, name.clone());
                            parts.push(GeminiPart {
                                function_call: Some(FunctionCall {
                                    id: None,
                                    name,
                                    args: input,
                                }),
                                ..GeminiPart::default()
                            });
                        }
                        ContentBlock::ToolResult {
                            tool_use_id,
                            content,
                            is_error,
                        } => {
                            let name = call_names.get(&tool_use_id).cloned().ok_or_else(|| {
                                LLMError::InvalidRequest(format!(
                                    "tool result '{tool_use_id}' has no matching tool call"
                                ))
                            })?;
                            parts.push(GeminiPart {
                                function_response: Some(FunctionResponse {
                                    name,
                                    response: wrap_tool_result(&content, is_error.unwrap_or(false)),
                                }),
                                ..GeminiPart::default()
                            });
                        }
                    }
                }
                parts
            }
            None => Vec::new(),
        };

        if parts.is_empty() {
            continue;
        }

        // Gemini wants one content per turn, e.g. all function responses
        // answering a parallel call together
        if let Some(last) = contents
            .last_mut()
            .filter(|c: &&mut GeminiContent| c.role.as_deref() == Some(role))
        {
            last.parts.extend(parts);
        } else {
            contents.push(GeminiContent {
                role: Some(role.to_string()),
                parts,
            });
        }
    }

    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };

    Ok((system, contents))
}

/// `functionResponse.response` must be a JSON object
fn wrap_tool_result(content: &str, is_error: bool) -> Value {
    if is_error {
        return json!({ "error": content });
    }

    match serde_json::from_str::<Value>(content) {
        Ok(value @ Value::Object(_)) => value,
        Ok(value) => json!({ "result": value }),
        Err(_) => json!({ "result": content }),
    }
}

fn convert_tools(tools: &[ToolDefinition], builtins: &[BuiltinTool]) -> Vec<GeminiTool> {
    let mut result = Vec::new();

    if !tools.is_empty() {
        result.push(GeminiTool::Functions {
            function_declarations: tools
                .iter()
                .map(|tool| FunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.input_schema.clone(),
                })
                .collect(),
        });
    }

    for builtin in builtins {
        match builtin {
            BuiltinTool::GoogleSearch => result.push(GeminiTool::GoogleSearch {
                google_search: Map::new(),
            }),
        }
    }

    result
}

fn parse_response(response: GeminiResponse) -> Result<CompletionResponse> {
    let usage = response.usage_metadata.unwrap_or_default();

    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LLMError::Blocked(reason));
        }
        return Err(LLMError::UnexpectedResponse(
            "No candidates in response".to_string(),
        ));
    };

    let mut blocks = Vec::new();
    let mut call_index = 0usize;

    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(call) = part.function_call {
            let id = call
                .id
                .unwrap_or_else(|| format!("call_{call_index}_{}", call.name));
            call_index += 1;
            let input = if call.args.is_null() {
                Value::Object(Map::new())
            } else {
                call.args
            };
            blocks.push(ContentBlock::ToolUse {
                id,
                name: call.name,
                input,
            });
        } else if let Some(text) = part.text {
            if text.is_empty() {
                continue;
            }
            if part.thought.unwrap_or(false) {
                blocks.push(ContentBlock::Thinking { text });
            } else {
                blocks.push(ContentBlock::Text { text });
            }
        }
    }

    let stop_reason = if call_index > 0 {
        StopReason::ToolUse
    } else {
        map_finish_reason(candidate.finish_reason.as_deref())
    };

    debug!(
        ?stop_reason,
        input_tokens = usage.prompt_token_count,
        output_tokens = usage.candidates_token_count,
        thinking_tokens = usage.thoughts_token_count,
        "Received response from Gemini API"
    );

    if blocks.is_empty() {
        warn!("Gemini returned a candidate without content");
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Ok(CompletionResponse {
        message: Message::assistant_blocks(blocks),
        stop_reason,
        usage: TokenUsage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            thinking_tokens: usage.thoughts_token_count,
        },
    })
}

fn map_finish_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("STOP") | None => StopReason::EndTurn,
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some(other) => {
            debug!("Unmapped finish reason: {}", other);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.config().api_key, "test-key");
        assert_eq!(
            provider.config().api_base,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(
            provider.endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_config_from_lookup() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", " key-123 "),
            ("GEMINI_API_BASE", "http://localhost:8080/v1beta"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.api_base, "http://localhost:8080/v1beta");
    }

    #[test]
    fn test_config_missing_key() {
        let result = GeminiConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(LLMError::ConfigurationError(_))));

        let result = GeminiConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_request_shape() {
        let provider = GeminiProvider::new("k").unwrap();
        let request = CompletionRequest::builder("gemini-2.5-flash")
            .system("You are an analyst")
            .add_message(Message::user("Analyze MSFT"))
            .max_tokens(512)
            .temperature(0.2)
            .tools(vec![ToolDefinition::new(
                "get_financial_data",
                "Fetch a snapshot",
                schema::object(json!({"ticker": schema::string("Symbol")}), vec!["ticker"]),
            )])
            .builtin_tools(vec![BuiltinTool::GoogleSearch])
            .build();

        let body = serde_json::to_value(provider.build_request(request).unwrap()).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are an analyst");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Analyze MSFT");
        assert_eq!(
            body["tools"][0]["functionDeclarations"][0]["name"],
            "get_financial_data"
        );
        assert_eq!(body["tools"][1]["googleSearch"], json!({}));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["includeThoughts"],
            true
        );
    }

    #[test]
    fn test_tool_round_trip_history() {
        let messages = vec![
            Message::user("Analyze GOOGL"),
            Message::assistant_blocks(vec![
                ContentBlock::Thinking {
                    text: "need numbers".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "call_0_get_financial_data".to_string(),
                    name: "get_financial_data".to_string(),
                    input: json!({"ticker": "GOOGL"}),
                },
            ]),
            Message::tool_result(
                "call_0_get_financial_data".to_string(),
                r#"{"company_name":"Alphabet Inc."}"#.to_string(),
            ),
        ];

        let (system, contents) = convert_messages(messages).unwrap();
        assert!(system.is_none());
        assert_eq!(contents.len(), 3);

        assert_eq!(contents[1].role.as_deref(), Some("model"));
        assert_eq!(contents[1].parts.len(), 1, "thinking is not sent back");
        let call = contents[1].parts[0].function_call.as_ref().unwrap();
        assert_eq!(call.name, "get_financial_data");

        let resp = contents[2].parts[0].function_response.as_ref().unwrap();
        assert_eq!(resp.name, "get_financial_data");
        assert_eq!(resp.response["company_name"], "Alphabet Inc.");
    }

    #[test]
    fn test_parallel_tool_results_share_one_content() {
        let messages = vec![
            Message::user("Research GOOGL"),
            Message::assistant_blocks(vec![
                ContentBlock::ToolUse {
                    id: "call_0_fundamental_analyst".to_string(),
                    name: "fundamental_analyst".to_string(),
                    input: json!({"request": "GOOGL"}),
                },
                ContentBlock::ToolUse {
                    id: "call_1_market_sentiment_analyst".to_string(),
                    name: "market_sentiment_analyst".to_string(),
                    input: json!({"request": "Alphabet"}),
                },
            ]),
            Message::tool_result(
                "call_0_fundamental_analyst".to_string(),
                r#"{"result":"solid"}"#.to_string(),
            ),
            Message::tool_error(
                "call_1_market_sentiment_analyst".to_string(),
                "search failed".to_string(),
            ),
        ];

        let (_, contents) = convert_messages(messages).unwrap();
        let shape: Vec<(Option<&str>, usize)> = contents
            .iter()
            .map(|c| (c.role.as_deref(), c.parts.len()))
            .collect();
        assert_eq!(
            shape,
            vec![(Some("user"), 1), (Some("model"), 2), (Some("user"), 2)]
        );

        let names: Vec<&str> = contents[2]
            .parts
            .iter()
            .map(|p| p.function_response.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["fundamental_analyst", "market_sentiment_analyst"]);
    }

    #[test]
    fn test_orphan_tool_result_rejected() {
        let result = convert_messages(vec![Message::tool_result(
            "missing".to_string(),
            "x".to_string(),
        )]);
        assert!(matches!(result, Err(LLMError::InvalidRequest(_))));
    }

    #[test]
    fn test_wrap_tool_result() {
        assert_eq!(wrap_tool_result(r#"{"a":1}"#, false), json!({"a": 1}));
        assert_eq!(wrap_tool_result("[1,2]", false), json!({"result": [1, 2]}));
        assert_eq!(wrap_tool_result("plain", false), json!({"result": "plain"}));
        assert_eq!(wrap_tool_result("boom", true), json!({"error": "boom"}));
    }

    #[test]
    fn test_parse_text_and_thought() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "weighing valuation", "thought": true},
                    {"text": "Buy."}
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3, "thoughtsTokenCount": 7}
        }))
        .unwrap();

        let parsed = parse_response(response).unwrap();
        assert_eq!(parsed.stop_reason, StopReason::EndTurn);
        assert_eq!(parsed.message.text().as_deref(), Some("Buy."));
        assert_eq!(parsed.message.thoughts(), vec!["weighing valuation"]);
        assert_eq!(parsed.usage.thinking_tokens, 7);
        assert_eq!(parsed.usage.total(), 22);
    }

    #[test]
    fn test_parse_function_calls_without_ids() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"functionCall": {"name": "get_financial_data", "args": {"ticker": "AAPL"}}},
                    {"functionCall": {"name": "get_financial_data", "args": {"ticker": "MSFT"}}}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let parsed = parse_response(response).unwrap();
        assert_eq!(parsed.stop_reason, StopReason::ToolUse);

        let ids: Vec<String> = parsed
            .message
            .tool_uses()
            .into_iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            vec!["call_0_get_financial_data", "call_1_get_financial_data"]
        );
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(parse_response(response), Err(LLMError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_parse_no_candidates() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            parse_response(response),
            Err(LLMError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason(Some("STOP")), StopReason::EndTurn);
        assert_eq!(map_finish_reason(Some("MAX_TOKENS")), StopReason::MaxTokens);
        assert_eq!(map_finish_reason(Some("SAFETY")), StopReason::EndTurn);
        assert_eq!(map_finish_reason(None), StopReason::EndTurn);
    }
}
