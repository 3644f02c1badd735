use std::time::Duration;

use async_trait::async_trait;
use delphi_core::{DelphiError, LlmConfig, Result};
use serde::{Deserialize, Serialize};

/// A message in a chat conversation with the completion service.
///
/// # Examples
///
/// ```
/// use delphi_rag::llm::{ChatMessage, Role};
///
/// let msg = ChatMessage {
///     role: Role::User,
///     content: "How does token validation work?".into(),
/// };
/// assert!(matches!(msg.role, Role::User));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: Role,
    /// Text content of the message.
    pub content: String,
}

/// Role in the chat conversation.
///
/// # Examples
///
/// ```
/// use delphi_rag::llm::Role;
///
/// let role = Role::System;
/// assert_eq!(serde_json::to_string(&role).unwrap(), "\"system\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-level instructions.
    System,
    /// User input.
    User,
    /// Assistant response.
    Assistant,
}

/// Per-request sampling parameters supplied by the engine.
///
/// Each operation carries its own model, temperature, and output-token
/// budget; nothing here is hardcoded in the client.
///
/// # Examples
///
/// ```
/// use delphi_rag::llm::SamplingParams;
///
/// let params = SamplingParams {
///     model: "gpt-4-turbo".into(),
///     temperature: 0.2,
///     max_tokens: 1000,
/// };
/// assert_eq!(params.max_tokens, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct SamplingParams {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens for the completion.
    pub max_tokens: u32,
}

/// Sends a system/user message pair to a completion service.
///
/// `Ok(None)` means the service responded successfully but produced no
/// text content — a valid, reportable outcome, not an error. Auth,
/// quota, network, and context-length failures all surface as
/// [`DelphiError::Completion`]; implementations perform no retries
/// and no silent fallback.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a single text completion.
    ///
    /// # Errors
    ///
    /// Returns [`DelphiError::Completion`] on any service failure.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: &SamplingParams,
    ) -> Result<Option<String>>;
}

/// OpenAI-compatible chat completions client.
///
/// Works with any provider that exposes the `/v1/chat/completions`
/// endpoint: OpenAI, Ollama, vLLM, LiteLLM, etc.
///
/// # Examples
///
/// ```
/// use delphi_core::LlmConfig;
/// use delphi_rag::llm::OpenAiCompletionClient;
///
/// let config = LlmConfig {
///     api_key: Some("test-key".into()),
///     ..LlmConfig::default()
/// };
/// let client = OpenAiCompletionClient::new(&config).unwrap();
/// ```
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    config: LlmConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiCompletionClient {
    /// Create a new completion client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DelphiError::Completion`] if the HTTP client cannot
    /// be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use delphi_core::LlmConfig;
    /// use delphi_rag::llm::OpenAiCompletionClient;
    ///
    /// let client = OpenAiCompletionClient::new(&LlmConfig::default()).unwrap();
    /// ```
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| DelphiError::Completion(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Return the model name from the configuration.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: &SamplingParams,
    ) -> Result<Option<String>> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("https://api.openai.com");
        let url = format!("{base_url}/v1/chat/completions");

        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: system.to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: user.to_string(),
            },
        ];

        let body = serde_json::json!({
            "model": params.model,
            "messages": messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        });

        let mut request = self.client.post(&url);
        if let Some(api_key) = self.config.resolve_api_key() {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }
        request = request.header("Content-Type", "application/json");

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| DelphiError::Completion(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(DelphiError::Completion(format!(
                "completion API error {status}: {body_text}"
            )));
        }

        let response_body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DelphiError::Completion(format!("failed to parse response: {e}")))?;

        // An empty choices array or a null content field is "no
        // content", not a protocol error.
        Ok(response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delphi_core::LlmConfig;

    #[test]
    fn client_construction_succeeds() {
        let config = LlmConfig::default();
        let client = OpenAiCompletionClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn model_returns_config_model() {
        let config = LlmConfig {
            model: "gpt-4o-mini".into(),
            ..LlmConfig::default()
        };
        let client = OpenAiCompletionClient::new(&config).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn chat_message_serializes() {
        let msg = ChatMessage {
            role: Role::System,
            content: "hello".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn response_with_null_content_is_none() {
        let raw = r#"{"choices":[{"message":{"content":null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.choices.into_iter().next().and_then(|c| c.message.content);
        assert!(content.is_none());
    }

    #[test]
    fn response_with_empty_choices_is_none() {
        let raw = r#"{"choices":[]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.choices.into_iter().next().and_then(|c| c.message.content);
        assert!(content.is_none());
    }

    #[test]
    fn response_with_content_is_some() {
        let raw = r#"{"choices":[{"message":{"content":"X works via code1."}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.choices.into_iter().next().and_then(|c| c.message.content);
        assert_eq!(content.as_deref(), Some("X works via code1."));
    }
}
