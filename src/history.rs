//! Durable conversation history.
//!
//! The store owns the in-memory log and is the only writer of the backing
//! file, so appending never re-reads storage. The file holds the full log as
//! a JSON array of `{content, sender}` records and is replaced atomically on
//! every append.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One rendered chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::Bot,
        }
    }
}

/// Append-only persisted log of chat messages.
pub struct HistoryStore {
    path: PathBuf,
    messages: Vec<Message>,
}

impl HistoryStore {
    /// Load the full log from `path`. A missing file is an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let messages = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .wrap_err_with(|| format!("corrupt history file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(eyre!("failed to read history file {}: {e}", path.display()));
            }
        };
        debug!(count = messages.len(), path = %path.display(), "loaded chat history");
        Ok(Self { path, messages })
    }

    /// Default location under the user data directory.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or_else(|| eyre!("no user data directory available"))?;
        Ok(base.join("polyglot-chat").join("history.json"))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append one message and persist the log.
    pub fn append(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        self.persist()
    }

    /// Drop every message from memory and storage.
    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.messages)?;
        // Write a sibling temp file and rename over the log so a crash
        // mid-write cannot leave a truncated history behind.
        let tmp = temp_path(&self.path);
        fs::write(&tmp, raw).wrap_err_with(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .wrap_err_with(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "history.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::load(dir.path().join("history.json")).unwrap();
        assert!(store.messages().is_empty());
    }

    #[test]
    fn round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::load(&path).unwrap();
        store.append(Message::user("Hello")).unwrap();
        store.append(Message::bot("Hi there")).unwrap();
        store.append(Message::bot("Anything else?")).unwrap();

        let reloaded = HistoryStore::load(&path).unwrap();
        assert_eq!(
            reloaded.messages(),
            &[
                Message::user("Hello"),
                Message::bot("Hi there"),
                Message::bot("Anything else?"),
            ]
        );
    }

    #[test]
    fn wire_format_matches_the_storage_schema() {
        let raw = serde_json::to_string(&Message::bot("Hi")).unwrap();
        assert_eq!(raw, r#"{"content":"Hi","sender":"bot"}"#);

        let parsed: Message =
            serde_json::from_str(r#"{"content":"Hello","sender":"user"}"#).unwrap();
        assert_eq!(parsed, Message::user("Hello"));
    }

    #[test]
    fn clear_empties_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::load(&path).unwrap();
        store.append(Message::bot("Hi")).unwrap();
        store.clear().unwrap();

        let reloaded = HistoryStore::load(&path).unwrap();
        assert!(reloaded.messages().is_empty());
    }

    #[test]
    fn append_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut store = HistoryStore::load(&path).unwrap();
        store.append(Message::bot("Hi")).unwrap();
        assert!(path.exists());
    }
}
