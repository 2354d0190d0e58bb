mod file;

pub use file::FileTranscriptStore;

use async_trait::async_trait;
use log::info;
use std::path::Path;
use crate::error::ChatError;
use crate::models::chat::Transcript;

#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Replaces whatever was stored with the full rendered transcript.
    async fn save(&self, transcript: &Transcript) -> Result<(), ChatError>;

    async fn load(&self) -> Result<String, ChatError>;

    fn location(&self) -> &Path;
}

pub fn initialize_transcript_store(path: &Path) -> FileTranscriptStore {
    let store = FileTranscriptStore::new(path);
    info!("Conversation will be written to: {}", store.location().display());
    store
}
