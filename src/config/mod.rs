pub mod transcript_path;

use chrono::{ Local, NaiveDateTime };
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Args;
use crate::error::ChatError;
use crate::input::InputProvider;
use crate::llm::{ ContextMode, LabelStrip, LlmConfig };

const API_KEY_PROMPT: &str = "Enter your OpenAI API key: ";
const FILE_PROMPT: &str = "Enter the filename for the conversation (e.g., conversation.md): ";

/// Everything the chat loop needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub llm: LlmConfig,
    pub transcript_path: PathBuf,
    pub context: ContextMode,
    pub strip_label: LabelStrip,
    pub system_prompt: Option<String>,
}

impl ChatConfig {
    /// Builds the configuration from parsed arguments, asking `input` for the
    /// API key and transcript file when they were not supplied.
    pub fn resolve(args: &Args, input: &mut dyn InputProvider) -> Result<Self, ChatError> {
        Self::resolve_at(args, input, Local::now().naive_local())
    }

    pub fn resolve_at(
        args: &Args,
        input: &mut dyn InputProvider,
        started: NaiveDateTime
    ) -> Result<Self, ChatError> {
        let api_key = value_or_prompt(&args.api_key, input, API_KEY_PROMPT)?
            .ok_or_else(|| ChatError::Config("An API key is required".to_string()))?;
        let file = value_or_prompt(&args.conversation_file, input, FILE_PROMPT)?
            .ok_or_else(|| ChatError::Config("A conversation file name is required".to_string()))?;

        let base_url = validate_base_url(&args.base_url)?;
        if !(0.0..=2.0).contains(&args.temperature) {
            return Err(
                ChatError::Config(
                    format!("Temperature must be between 0 and 2, got {}", args.temperature)
                )
            );
        }

        let transcript_path = if args.no_timestamp {
            PathBuf::from(&file)
        } else {
            transcript_path::timestamped(&PathBuf::from(&file), &started)?
        };

        let system_prompt = args.system_prompt
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            llm: LlmConfig {
                api_key,
                model: args.model.trim().to_string(),
                base_url,
                flavor: args.api,
                temperature: args.temperature,
                max_tokens: args.max_tokens,
                timeout: args.timeout_secs.map(Duration::from_secs),
            },
            transcript_path,
            context: args.context,
            strip_label: args.strip_label,
            system_prompt,
        })
    }

    pub fn log_summary(&self) {
        info!("--- Chat Configuration ---");
        info!("Endpoint: {}", self.llm.endpoint());
        info!("Model: {}", self.llm.model);
        info!("API Flavor: {:?}", self.llm.flavor);
        info!("Context Mode: {:?}", self.context);
        info!("Label Strip: {:?}", self.strip_label);
        info!("Temperature: {}", self.llm.temperature);
        info!("Max Tokens: {:?}", self.llm.max_tokens);
        info!("Timeout: {:?}", self.llm.timeout);
        info!("System Prompt: {}", self.system_prompt.is_some());
        info!("Transcript File: {}", self.transcript_path.display());
        info!("--------------------------");
    }
}

fn value_or_prompt(
    value: &str,
    input: &mut dyn InputProvider,
    prompt: &str
) -> Result<Option<String>, ChatError> {
    let value = value.trim();
    if !value.is_empty() {
        return Ok(Some(value.to_string()));
    }
    let answer = input.read_line(prompt)?;
    Ok(
        answer
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
    )
}

fn validate_base_url(raw: &str) -> Result<String, ChatError> {
    let url = Url::parse(raw.trim()).map_err(|e|
        ChatError::Config(format!("Invalid base URL '{}': {}", raw, e))
    )?;
    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
        other => Err(ChatError::Config(format!("Unsupported URL scheme '{}' in '{}'", other, raw))),
    }
}
