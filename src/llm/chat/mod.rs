pub mod openai;
pub mod reply;

use async_trait::async_trait;
use std::sync::Arc;
use super::{ ApiFlavor, LlmConfig };
use self::openai::OpenAIChatClient;
use crate::error::ChatError;
use crate::models::chat::ChatMessage;

/// What goes out as the prompt of a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Plain text, sent as one user message or as the legacy `prompt` field.
    Text(String),
    /// Role-tagged messages in conversation order.
    Messages(Vec<ChatMessage>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: Prompt,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// The first choice of a completion, exactly as the endpoint returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub finish_reason: Option<String>,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ChatError>;

    fn model(&self) -> &str;
    fn flavor(&self) -> ApiFlavor;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ChatError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
