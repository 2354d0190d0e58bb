pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Which request shape the endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// `POST /chat/completions` with a `messages` list.
    Chat,
    /// `POST /completions` with a raw `prompt` string.
    Completions,
}

impl ApiFlavor {
    pub fn route(&self) -> &'static str {
        match self {
            ApiFlavor::Chat => "/chat/completions",
            ApiFlavor::Completions => "/completions",
        }
    }
}

/// How much of the conversation goes out with each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    Latest,
    Transcript,
    Messages,
}

/// What to do with a leading `label:` in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStrip {
    Off,
    FirstColon,
    Speaker,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseOptionError {
    message: String,
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseOptionError {}

impl FromStr for ApiFlavor {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(ApiFlavor::Chat),
            "completions" | "completion" => Ok(ApiFlavor::Completions),
            _ =>
                Err(ParseOptionError {
                    message: format!("Invalid API flavor: '{}' (expected chat or completions)", s),
                }),
        }
    }
}

impl FromStr for ContextMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(ContextMode::Latest),
            "transcript" => Ok(ContextMode::Transcript),
            "messages" => Ok(ContextMode::Messages),
            _ =>
                Err(ParseOptionError {
                    message: format!(
                        "Invalid context mode: '{}' (expected latest, transcript or messages)",
                        s
                    ),
                }),
        }
    }
}

impl FromStr for LabelStrip {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "off" | "none" => Ok(LabelStrip::Off),
            "first-colon" => Ok(LabelStrip::FirstColon),
            "speaker" => Ok(LabelStrip::Speaker),
            _ =>
                Err(ParseOptionError {
                    message: format!(
                        "Invalid label strip policy: '{}' (expected off, first-colon or speaker)",
                        s
                    ),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub flavor: ApiFlavor,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            flavor: ApiFlavor::Chat,
            temperature: 0.2,
            max_tokens: None,
            timeout: None,
        }
    }
}

impl LlmConfig {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.flavor.route())
    }
}
