use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("no response")]
    EmptyChoices,

    #[error("could not write transcript {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("could not write to terminal: {0}")]
    Output(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChatError {
    /// Errors after which the chat loop keeps prompting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ChatError::Input(_) | ChatError::Output(_) | ChatError::Config(_))
    }
}
