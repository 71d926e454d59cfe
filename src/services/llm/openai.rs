// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{GenerateRequest, LlmProvider, Operation, ProviderFailure, transport_failure};
use crate::config::Config;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const NAME: &str = "openai";

const SUMMARY_CONTEXT_CHARS: usize = 4_000;
const ANSWER_CONTEXT_CHARS: usize = 3_000;

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Build a client when a usable key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, reqwest::Error> {
        let Some(key) = config.openai_key() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            client,
            base_url: config
                .openai_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config.openai_model.clone(),
            api_key: SecretString::from(key.to_string()),
            temperature: config.temperature,
        }))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderFailure> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    Message {
                        role: "system".into(),
                        content: request.system.clone(),
                    },
                    Message {
                        role: "user".into(),
                        content: request.user.clone(),
                    },
                ],
                temperature: self.temperature,
                max_tokens: request.max_tokens,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| transport_failure(NAME, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::new(
                NAME,
                Some(status.as_u16()),
                format!("HTTP {status}: {body}"),
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::new(NAME, None, format!("invalid response: {e}")))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderFailure::new(NAME, None, "empty response"));
        }
        Ok(text.to_string())
    }

    fn context_chars(&self, op: Operation) -> usize {
        match op {
            Operation::Summarize => SUMMARY_CONTEXT_CHARS,
            Operation::Answer => ANSWER_CONTEXT_CHARS,
        }
    }

    fn name(&self) -> &str {
        NAME
    }
}
