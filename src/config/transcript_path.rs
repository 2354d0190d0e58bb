use chrono::NaiveDateTime;
use std::path::{ Path, PathBuf };

use crate::error::ChatError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H:%M:%S-";

/// Prefixes the file name component with `stamp`, keeping any directory part.
///
/// `logs/chat.md` at 2023-03-05 09:04:02 becomes
/// `logs/2023-03-05-09:04:02-chat.md`.
pub fn timestamped(path: &Path, stamp: &NaiveDateTime) -> Result<PathBuf, ChatError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            ChatError::Config(format!("Transcript path '{}' has no file name", path.display()))
        })?;
    let mut name = stamp.format(TIMESTAMP_FORMAT).to_string();
    name.push_str(&file_name.to_string_lossy());
    Ok(path.with_file_name(name))
}
