use crate::traits::{LlmClient, LlmError, LlmResponse};
use async_trait::async_trait;
use jobwatch_common::Result;
use jobwatch_http::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

/// Client for the OpenAI chat completions endpoint.
pub struct OpenAiClient {
    client: HttpClient,
    api_key: String,
    model: String,
    store: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    store: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    pub total_tokens: u32,
}

impl OpenAiClient {
    /// Create a new client for the given API key and model against the
    /// public API.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_base_url(api_key, model, OPENAI_API_BASE)
    }

    /// Create a client against an OpenAI-compatible endpoint.
    pub fn with_base_url(api_key: String, model: String, base_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("OpenAI API key is empty".to_string()).into());
        }
        let client = HttpClient::new(base_url)
            .map_err(|e| LlmError::Config(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
            store: true,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    /// Whether completions are stored on the provider side (`store` flag).
    pub fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let req = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
            store: self.store,
        };

        tracing::debug!(model = %self.model, ?temperature, ?max_tokens, "openai.chat.start");

        let resp: ChatCompletionResponse = self
            .client
            .post_json("chat/completions", Some(&self.api_key), &req)
            .await
            .map_err(http_to_llm)?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Empty(format!("completion {} has no message content", resp.id)))?;

        let tokens_used = resp.usage.map(|u| u.total_tokens);
        tracing::debug!(model = %resp.model, ?tokens_used, "openai.chat.done");

        Ok(LlmResponse {
            text,
            model: Some(resp.model),
            tokens_used,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let test_prompt = "Respond with just 'OK'";

        match self.generate(test_prompt, None, Some(5), Some(0.1)).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("OpenAi health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

fn http_to_llm(e: HttpError) -> LlmError {
    LlmError::Api(e.to_string())
}
