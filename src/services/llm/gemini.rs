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

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const NAME: &str = "gemini";

const SUMMARY_CONTEXT_CHARS: usize = 10_000;
const ANSWER_CONTEXT_CHARS: usize = 30_000;

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

impl GeminiProvider {
    /// Build a client when a usable key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, reqwest::Error> {
        let Some(key) = config.gemini_key() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            client,
            base_url: config
                .gemini_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config.gemini_model.clone(),
            api_key: SecretString::from(key.to_string()),
            temperature: config.temperature,
        }))
    }

    fn model_path(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderFailure> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model_path());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&GenerateContentRequest {
                contents: vec![Content {
                    role: Some("user".into()),
                    parts: vec![Part {
                        text: request.user.clone(),
                    }],
                }],
                system_instruction: Content {
                    role: None,
                    parts: vec![Part {
                        text: request.system.clone(),
                    }],
                },
                generation_config: GenerationConfig {
                    temperature: self.temperature,
                    max_output_tokens: request.max_tokens,
                },
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

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::new(NAME, None, format!("invalid response: {e}")))?;

        if let Some(err) = body.error {
            let status = err.status.unwrap_or_default();
            return Err(ProviderFailure::new(
                NAME,
                None,
                format!("{status} {}", err.message).trim().to_string(),
            ));
        }

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
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
