use async_trait::async_trait;
use log::debug;
use std::path::{ Path, PathBuf };
use tokio::fs;

use crate::error::ChatError;
use crate::history::TranscriptStore;
use crate::models::chat::Transcript;

/// Flat-text transcript file, rewritten in full on every save.
pub struct FileTranscriptStore {
    path: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn persist_error(&self, source: std::io::Error) -> ChatError {
        ChatError::Persist {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl TranscriptStore for FileTranscriptStore {
    async fn save(&self, transcript: &Transcript) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.persist_error(e))?;
        }
        let text = transcript.render();
        fs::write(&self.path, text.as_bytes()).await.map_err(|e| self.persist_error(e))?;
        debug!("Wrote {} entries ({} bytes) to {}", transcript.len(), text.len(), self.path.display());
        Ok(())
    }

    async fn load(&self) -> Result<String, ChatError> {
        fs::read_to_string(&self.path).await.map_err(|e| self.persist_error(e))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
