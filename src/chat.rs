// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Investing assistant backed by a generative-language completion service.
//!
//! A conversation is flattened into a single prompt (system prompt followed by
//! the role-tagged history) and sent in one call bounded by a deadline.

use crate::config::Config;
use crate::models::Role;
use crate::utils::http_client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const SYSTEM_PROMPT: &str = "\
You are FinvestAI, a financial assistant specializing in helping Indian investors. Your task is to provide
educational content about investing in India, help users discover suitable investment products, and improve
their financial literacy. Always provide information specific to the Indian market and regulations.

When discussing investment products like mutual funds, always mention:
1. The category (large cap, mid cap, etc.)
2. Risk level
3. Historical returns (if available)
4. Minimum investment amount
5. Key benefits and considerations

When explaining financial concepts, be clear, concise, and avoid jargon. If you must use financial terms,
explain them clearly.

Important note: Always clarify that you're providing educational information, not personalized financial advice.
Recommend that users consult with a certified financial advisor before making investment decisions.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("no Gemini API key configured; set GEMINI_API_KEY or run `finvest config set gemini_api_key <KEY>`")]
    MissingApiKey,
    #[error("completion service did not answer within {secs}s")]
    Timeout { secs: u64 },
    #[error("completion service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("completion service sent an unreadable response: {0}")]
    MalformedResponse(String),
    #[error("completion service returned no text")]
    EmptyResponse,
    #[error("could not reach completion service: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Result of one exchange: the reply plus the transcript including both new turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub response: String,
    pub conversation: Vec<ChatTurn>,
}

/// Anything that turns a prompt into a completion.
pub trait Completion {
    fn complete(&self, prompt: &str) -> Result<String, ChatError>;
}

pub fn build_prompt(turns: &[ChatTurn]) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);
    prompt.push_str("\n\nConversation history:\n");
    for turn in turns {
        let speaker = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        prompt.push_str(&format!("\n{}: {}\n", speaker, turn.content));
    }
    prompt
}

/// Appends `message` to `history`, asks `provider` for a reply and returns the new transcript.
pub fn respond(
    provider: &dyn Completion,
    history: &[ChatTurn],
    message: &str,
) -> Result<ChatExchange, ChatError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    let mut conversation = history.to_vec();
    conversation.push(ChatTurn::new(Role::User, message));

    let prompt = build_prompt(&conversation);
    log::debug!(
        "requesting completion for {} turns ({} prompt bytes)",
        conversation.len(),
        prompt.len()
    );
    let response = provider.complete(&prompt)?;
    conversation.push(ChatTurn::new(Role::Assistant, response.clone()));
    Ok(ChatExchange {
        response,
        conversation,
    })
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini `generateContent` client with a hard per-call deadline.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        if api_key.trim().is_empty() {
            return Err(ChatError::MissingApiKey);
        }
        let http = http_client(timeout).map_err(|e| ChatError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key: api_key.trim().to_string(),
            timeout,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ChatError> {
        let key = cfg.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;
        Self::new(key, &cfg.model, &cfg.base_url, cfg.chat_timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> ChatError {
        if err.is_timeout() {
            log::warn!("completion request timed out after {:?}", self.timeout);
            ChatError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            ChatError::Transport(err.to_string())
        }
    }
}

impl Completion for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        let text = resp.text().map_err(|e| self.classify(e))?;
        if !status.is_success() {
            log::warn!("completion service answered {}", status);
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
        let reply: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if reply.trim().is_empty() {
            return Err(ChatError::EmptyResponse);
        }
        Ok(reply)
    }
}
