use clap::Parser;

use crate::llm::{ ApiFlavor, ContextMode, LabelStrip, DEFAULT_BASE_URL, DEFAULT_MODEL };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Line-by-line chat with an OpenAI-compatible model", long_about = None)]
pub struct Args {
    // --- Credentials & Transcript ---
    /// API key sent as a bearer token. Prompted for interactively when empty.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Transcript file (e.g., conversation.md). Prompted for interactively when empty.
    #[arg(long, env = "CONVERSATION_FILE", default_value = "")]
    pub conversation_file: String,

    /// Do not prefix the transcript file name with the session start time.
    #[arg(long, env = "NO_TIMESTAMP_PREFIX", default_value = "false")]
    pub no_timestamp: bool,

    // --- Chat LLM Provider Args ---
    /// Model name (e.g., gpt-3.5-turbo, gpt-4o)
    #[arg(long, env = "CHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API; the route is appended per flavor.
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request shape (chat, completions)
    #[arg(long, env = "CHAT_API", default_value = "chat")]
    pub api: ApiFlavor,

    /// Context sent per turn (latest, transcript, messages)
    #[arg(long, env = "CHAT_CONTEXT", default_value = "messages")]
    pub context: ContextMode,

    /// Handling of a leading `label:` in replies (off, first-colon, speaker)
    #[arg(long, env = "CHAT_STRIP_LABEL", default_value = "speaker")]
    pub strip_label: LabelStrip,

    /// Sampling temperature.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.2")]
    pub temperature: f32,

    /// Upper bound on generated tokens. Unset leaves it to the API.
    #[arg(long, env = "CHAT_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// System instruction placed ahead of the conversation in messages mode.
    #[arg(long, env = "CHAT_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    /// Request timeout in seconds. Unset keeps the HTTP client default.
    #[arg(long, env = "CHAT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_into_typed_options() {
        let args = Args::try_parse_from([
            "chatbot",
            "--api-key",
            "sk-1",
            "--conversation-file",
            "logs/chat.md",
            "--api",
            "completions",
            "--context",
            "latest",
            "--strip-label",
            "first-colon",
            "--temperature",
            "0.7",
            "--max-tokens",
            "256",
            "--no-timestamp",
        ]).unwrap();

        assert_eq!(args.api_key, "sk-1");
        assert_eq!(args.conversation_file, "logs/chat.md");
        assert_eq!(args.api, ApiFlavor::Completions);
        assert_eq!(args.context, ContextMode::Latest);
        assert_eq!(args.strip_label, LabelStrip::FirstColon);
        assert_eq!(args.temperature, 0.7);
        assert_eq!(args.max_tokens, Some(256));
        assert!(args.no_timestamp);
    }

    #[test]
    fn bad_option_values_are_rejected() {
        assert!(Args::try_parse_from(["chatbot", "--context", "window"]).is_err());
    }
}
