use crate::config::AiConfig;
use crate::error::AiError;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::ReviewModel;

const SYSTEM_PROMPT: &str = "You are an expert software code reviewer.";

pub struct OpenRouterClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

fn user_prompt(label: &str, payload: &str) -> String {
    format!("Please review this {} code:\n\n{}", label, payload)
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl ReviewModel for OpenRouterClient {
    async fn review(&self, label: &str, payload: &str) -> Result<String, AiError> {
        // Checked before any request goes out, so a keyless deployment
        // degrades without ever touching the network.
        let api_key = self.api_key.as_ref().ok_or(AiError::MissingKey)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(label, payload),
                },
            ],
        };

        debug!(model = %self.model, label = %label, "requesting AI review");

        let response = self
            .client
            .post(&self.base_url)
            .timeout(self.timeout)
            .header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api(body));
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| AiError::Failed("no completion choices in response".to_string()))
    }
}
