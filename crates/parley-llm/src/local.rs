//! Local inference server backend

use serde::{Deserialize, Serialize};

use crate::backend::GenError;

/// Role-prefix echoes some chat templates leak into the decoded output.
/// Checked in order; only the first match is stripped.
const ROLE_PREFIXES: &[&str] = &[
    "assistant\n\n",
    "assistant:\n\n",
    "assistant：",
    "assistant ",
    "Assistant\n\n",
    "Assistant:",
    "Assistant：",
    "Assistant ",
];

/// Chat request for the local server's API
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

/// Backend for a locally-hosted generative model served over HTTP
/// (Ollama-style `/api/chat`).
///
/// Each item becomes a two-turn (system, user) exchange rendered by the
/// server's chat template. No retry: local failures are assumed
/// deterministic, so they propagate and abort the batch.
#[derive(Debug)]
pub struct LocalBackend {
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl LocalBackend {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature: 0.7,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) async fn generate(
        &self,
        prompts: &[String],
        system_prompts: &[String],
        max_tokens: u32,
    ) -> Result<Vec<String>, GenError> {
        let mut results = Vec::with_capacity(prompts.len());
        for (prompt, system) in prompts.iter().zip(system_prompts) {
            let text = self.chat_one(prompt, system, max_tokens).await?;
            results.push(strip_role_prefix(&text).to_string());
        }
        Ok(results)
    }

    async fn chat_one(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<String, GenError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenError::InvalidResponse(e.to_string()))?;

        Ok(api_response.message.content)
    }
}

/// Strip a leaked role prefix from a decoded completion, if present.
fn strip_role_prefix(text: &str) -> &str {
    for prefix in ROLE_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            return rest;
        }
    }
    text
}
