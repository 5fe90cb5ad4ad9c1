//! Test helpers for code that talks to an [`LLMProvider`]
//!
//! Enabled inside this crate's tests and, for downstream crates, through the
//! `test-util` feature.

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message, Result,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Provider that replays queued responses in order and records every request
///
/// When the queue runs dry, `complete` fails with
/// [`LLMError::UnexpectedResponse`].
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider from a list of responses
    pub fn with_responses(responses: impl IntoIterator<Item = CompletionResponse>) -> Self {
        let provider = Self::new();
        for response in responses {
            provider.push(response);
        }
        provider
    }

    /// Queue a response
    pub fn push(&self, response: CompletionResponse) {
        self.lock_responses().push_back(Ok(response));
    }

    /// Queue an error
    pub fn push_error(&self, error: LLMError) {
        self.lock_responses().push_back(Err(error));
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of queued responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.lock_responses().len()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<CompletionResponse>>> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.lock_responses().pop_front().unwrap_or_else(|| {
            Err(LLMError::UnexpectedResponse(
                "scripted provider has no responses left".to_string(),
            ))
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Final text turn
pub fn text_response(text: impl Into<String>) -> CompletionResponse {
    blocks_response(
        vec![ContentBlock::Text { text: text.into() }],
        StopReason::EndTurn,
    )
}

/// Text turn preceded by a reasoning summary
pub fn thinking_response(thought: impl Into<String>, text: impl Into<String>) -> CompletionResponse {
    blocks_response(
        vec![
            ContentBlock::Thinking {
                text: thought.into(),
            },
            ContentBlock::Text { text: text.into() },
        ],
        StopReason::EndTurn,
    )
}

/// Single tool call turn
pub fn tool_use_response(
    id: impl Into<String>,
    name: impl Into<String>,
    input: serde_json::Value,
) -> CompletionResponse {
    blocks_response(
        vec![ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }],
        StopReason::ToolUse,
    )
}

/// Arbitrary assistant turn
pub fn blocks_response(blocks: Vec<ContentBlock>, stop_reason: StopReason) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant_blocks(blocks),
        stop_reason,
        usage: TokenUsage::default(),
    }
}
