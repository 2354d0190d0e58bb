use log::{ debug, error, info, warn };
use std::io::Write;
use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::history::TranscriptStore;
use crate::input::InputProvider;
use crate::llm::chat::reply::clean_reply;
use crate::llm::chat::{ ChatClient, CompletionRequest, Prompt };
use crate::llm::{ ContextMode, LabelStrip };
use crate::models::chat::{ ChatMessage, Role, Transcript };

/// Per-turn request settings.
#[derive(Debug, Clone)]
pub struct TurnOptions {
    pub context: ContextMode,
    pub strip_label: LabelStrip,
    pub system_prompt: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl From<&ChatConfig> for TurnOptions {
    fn from(config: &ChatConfig) -> Self {
        Self {
            context: config.context,
            strip_label: config.strip_label,
            system_prompt: config.system_prompt.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub turns: usize,
    pub failed_requests: usize,
    pub failed_writes: usize,
}

/// Drives the read, ask, print, persist cycle.
pub struct ChatAgent {
    client: Arc<dyn ChatClient>,
    store: Arc<dyn TranscriptStore>,
    options: TurnOptions,
    transcript: Transcript,
}

impl ChatAgent {
    pub fn new(
        client: Arc<dyn ChatClient>,
        store: Arc<dyn TranscriptStore>,
        options: TurnOptions
    ) -> Self {
        let transcript = Transcript::new(client.model());
        Self {
            client,
            store,
            options,
            transcript,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Builds the request for `input` without touching the transcript.
    pub fn build_request(&self, input: &str) -> CompletionRequest {
        let prompt = match self.options.context {
            ContextMode::Latest => Prompt::Text(input.to_string()),
            ContextMode::Transcript => Prompt::Text(self.transcript.render_with_pending(input)),
            ContextMode::Messages => {
                let mut messages = Vec::with_capacity(self.transcript.len() + 2);
                if let Some(system) = &self.options.system_prompt {
                    messages.push(ChatMessage::new(Role::System, system.clone()));
                }
                messages.extend(self.transcript.messages().iter().cloned());
                messages.push(ChatMessage::new(Role::User, input));
                Prompt::Messages(messages)
            }
        };
        CompletionRequest {
            prompt,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        }
    }

    /// Sends one turn and commits it on success. On any error the transcript
    /// is left exactly as it was.
    pub async fn ask(&mut self, input: &str) -> Result<String, ChatError> {
        let input = input.trim();
        let request = self.build_request(input);
        let completion = self.client.complete(&request).await?;
        if let Some(reason) = completion.finish_reason.as_deref().filter(|r| *r != "stop") {
            warn!("Completion finished early: {}", reason);
        }

        let reply = clean_reply(&completion.text, self.options.strip_label, self.client.model());
        if reply.is_empty() {
            return Err(ChatError::EmptyChoices);
        }
        self.transcript.push_turn(input, reply.clone());
        debug!("Committed turn {}", self.transcript.len() / 2);
        Ok(reply)
    }

    pub async fn persist(&self) -> Result<(), ChatError> {
        self.store.save(&self.transcript).await
    }

    pub fn welcome(&self, out: &mut dyn Write) -> Result<(), ChatError> {
        writeln!(out, "\nWelcome to the chatbot! Talking to {}.\n", self.client.model()).map_err(
            ChatError::Output
        )
    }

    /// Loops until `input` runs dry. Request and write failures are printed
    /// and the next prompt follows; there is no retry.
    pub async fn run(
        &mut self,
        input: &mut dyn InputProvider,
        out: &mut dyn Write
    ) -> Result<SessionSummary, ChatError> {
        let mut summary = SessionSummary::default();
        let prompt = format!("{}: ", self.transcript.user_label());

        loop {
            let line = match input.read_line(&prompt) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("End of input after {} turns", summary.turns);
                    break;
                }
                Err(e) => {
                    error!("Stopping: {}", e);
                    writeln!(out, "Error: {}", e).map_err(ChatError::Output)?;
                    break;
                }
            };

            match self.ask(&line).await {
                Ok(reply) => {
                    summary.turns += 1;
                    writeln!(out, "{}: {}", self.client.model(), reply).map_err(ChatError::Output)?;
                }
                Err(e) if !e.is_recoverable() => {
                    return Err(e);
                }
                Err(e) => {
                    summary.failed_requests += 1;
                    error!("Request failed: {}", e);
                    writeln!(out, "Error: {}", e).map_err(ChatError::Output)?;
                    continue;
                }
            }

            if let Err(e) = self.persist().await {
                summary.failed_writes += 1;
                error!("Transcript write failed: {}", e);
                writeln!(out, "Error: {}", e).map_err(ChatError::Output)?;
            }
        }

        out.flush().map_err(ChatError::Output)?;
        Ok(summary)
    }
}
