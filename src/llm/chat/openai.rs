use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, Completion, CompletionRequest, Prompt };
use crate::error::ChatError;
use crate::llm::{ ApiFlavor, LlmConfig };
use crate::models::chat::{ ChatMessage, Role };

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    endpoint: String,
    flavor: ApiFlavor,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct OpenAICompletionRequest {
    model: String,
    prompt: String,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum OpenAIRequestBody {
    Chat(OpenAIChatRequest),
    Completions(OpenAICompletionRequest),
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    #[serde(default)]
    message: Option<OpenAIMessage>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

impl From<&ChatMessage> for OpenAIMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

impl OpenAIChatClient {
    pub fn new(
        api_key: &str,
        model: String,
        endpoint: String,
        flavor: ApiFlavor,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| ChatError::Config(format!("Invalid API key format: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            model,
            endpoint,
            flavor,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ChatError> {
        if config.api_key.trim().is_empty() {
            return Err(ChatError::Config("OpenAI API key is required".to_string()));
        }
        Self::new(
            config.api_key.trim(),
            config.model.clone(),
            config.endpoint(),
            config.flavor,
            config.timeout,
        )
    }
}

/// Shapes the request body for the given flavor.
fn build_body(model: &str, flavor: ApiFlavor, request: &CompletionRequest) -> OpenAIRequestBody {
    match flavor {
        ApiFlavor::Chat => {
            let messages = match &request.prompt {
                Prompt::Text(text) =>
                    vec![OpenAIMessage { role: Role::User.as_str().to_string(), content: text.clone() }],
                Prompt::Messages(messages) => messages.iter().map(OpenAIMessage::from).collect(),
            };
            OpenAIRequestBody::Chat(OpenAIChatRequest {
                model: model.to_string(),
                messages,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            })
        }
        ApiFlavor::Completions => {
            let prompt = match &request.prompt {
                Prompt::Text(text) => text.clone(),
                Prompt::Messages(messages) =>
                    messages
                        .iter()
                        .map(|m| format!("{}: {}\n", m.role, m.content))
                        .collect(),
            };
            OpenAIRequestBody::Completions(OpenAICompletionRequest {
                model: model.to_string(),
                prompt,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            })
        }
    }
}

/// Pulls the first choice out of a response body. Chat replies carry
/// `message.content`, legacy completions carry `text`.
fn parse_completion(body: &str) -> Result<Completion, ChatError> {
    let response: OpenAIResponse = serde_json::from_str(body)?;
    let choice = response.choices.into_iter().next().ok_or(ChatError::EmptyChoices)?;
    let text = choice.message
        .map(|m| m.content)
        .or(choice.text)
        .ok_or(ChatError::EmptyChoices)?;
    Ok(Completion {
        text,
        finish_reason: choice.finish_reason,
    })
}

fn api_error(status: reqwest::StatusCode, body: &str) -> ChatError {
    let message = serde_json::from_str::<OpenAIErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                trimmed.to_string()
            }
        });
    ChatError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ChatError> {
        let body = build_body(&self.model, self.flavor, request);
        if log::log_enabled!(log::Level::Debug) {
            debug!("POST {} body={}", self.endpoint, serde_json::to_string(&body)?);
        }

        let resp = self.http.post(&self.endpoint).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!("Response {} body={}", status, text);

        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        parse_completion(&text)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn flavor(&self) -> ApiFlavor {
        self.flavor
    }
}
