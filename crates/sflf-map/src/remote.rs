//! Language-model lookup over an OpenAI-compatible chat completions API.
//!
//! The model is asked for exactly one canonical name or `unmapped`. Any
//! other answer, and any transport failure, counts as no match.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sflf_model::{MatchMethod, Vocabulary};
use tracing::{debug, warn};

use crate::error::{MatchError, Result};
use crate::strategy::{MatchResult, NameMatchStrategy, Query};

/// Confidence assigned to accepted answers.
pub const REMOTE_CONFIDENCE: f32 = 0.8;

const UNMAPPED_ANSWER: &str = "unmapped";
const MAX_TOKENS: u32 = 50;

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Reads the API key from the environment variable `api_key_env`.
    pub fn from_env(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key_env: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MatchError::MissingApiKey {
                var: api_key_env.to_string(),
            })?;
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            timeout,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatAnswer,
}

#[derive(Deserialize)]
struct ChatAnswer {
    content: Option<String>,
}

pub struct RemoteStrategy {
    client: Client,
    config: RemoteConfig,
}

impl RemoteStrategy {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(MatchError::InvalidEndpoint {
                endpoint: config.endpoint,
            });
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MatchError::Client {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    fn ask(&self, prompt: &str) -> std::result::Result<String, reqwest::Error> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
        };
        let response: ChatResponse = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

impl NameMatchStrategy for RemoteStrategy {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<MatchResult> {
        let prompt = build_prompt(query.original.trim(), query.vocabulary);
        let answer = match self.ask(&prompt) {
            Ok(answer) => answer,
            Err(error) => {
                warn!(label = query.original, %error, "remote lookup failed");
                return None;
            }
        };
        let answer = answer.trim().trim_matches('"');
        debug!(label = query.original, answer, "remote answer");
        accept_answer(answer, query.vocabulary)
            .map(|canonical| MatchResult::new(canonical, REMOTE_CONFIDENCE, MatchMethod::Remote))
    }
}

fn build_prompt(label: &str, vocabulary: Vocabulary) -> String {
    let (kind, plural) = match vocabulary {
        Vocabulary::Column => ("column name", "columns"),
        Vocabulary::Status => ("status value", "statuses"),
    };
    let targets = vocabulary
        .canonical_names()
        .iter()
        .filter(|name| !name.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Map the following {kind} to one of the Standard FOIA Log Format {plural}.\n\n\
         {kind}: \"{label}\"\n\n\
         Standard values: {targets}\n\n\
         If it does not match any of them, return \"{UNMAPPED_ANSWER}\".\n\
         Return only the exact value from the list above, or \"{UNMAPPED_ANSWER}\"."
    )
}

/// Only exact canonical names are accepted.
fn accept_answer(answer: &str, vocabulary: Vocabulary) -> Option<&'static str> {
    if answer.is_empty() || answer == UNMAPPED_ANSWER {
        return None;
    }
    vocabulary
        .canonical_names()
        .iter()
        .find(|name| **name == answer)
        .copied()
}
