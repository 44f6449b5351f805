use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// One chat round trip: system instructions plus the rendered user prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// A language model that answers a prompt with raw, untrusted text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizModel: Send + Sync {
    async fn complete(&self, request: &ModelRequest) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint
/// (OpenAI itself, or Gemini through its compatibility layer).
pub struct OpenAiQuizModel {
    client: Client<OpenAIConfig>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiQuizModel {
    pub fn new(api_key: &SecretString, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl QuizModel for OpenAiQuizModel {
    async fn complete(&self, request: &ModelRequest) -> AppResult<String> {
        log::info!(
            "Requesting completion from {} ({} prompt chars)",
            self.model,
            request.prompt.len()
        );

        let body = json!({
            "model": self.model,
            "temperature": request.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
        });

        let completion: ChatCompletion = self.client.chat().create_byot(body).await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::GenerationError("model returned no choices".to_string()))?;

        if choice.finish_reason.as_deref() == Some("length") {
            log::warn!("Completion from {} was cut off at the token limit", self.model);
        }

        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::GenerationError("model returned an empty message".to_string()))
    }
}

/// Stand-in used when no API key is configured. Always answers with the same
/// fixed quiz, which still goes through validation like a real answer.
pub struct PlaceholderQuizModel;

impl PlaceholderQuizModel {
    pub fn response() -> String {
        json!({
            "summary": "",
            "key_entities": {
                "people": ["Person A", "Person B"],
                "organizations": ["Org A", "Org B"],
                "locations": ["Location A", "Location B"]
            },
            "quiz": [
                {
                    "question": "Sample question?",
                    "options": ["A", "B", "C", "D"],
                    "answer": "B",
                    "difficulty": "easy",
                    "explanation": "Sample explanation"
                }
            ],
            "related_topics": ["Topic 1", "Topic 2"]
        })
        .to_string()
    }
}

#[async_trait]
impl QuizModel for PlaceholderQuizModel {
    async fn complete(&self, _request: &ModelRequest) -> AppResult<String> {
        log::warn!("No LLM configured, answering with the placeholder quiz");
        Ok(Self::response())
    }
}
