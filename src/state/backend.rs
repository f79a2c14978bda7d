//! Durable backends for the state document.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InstallError, Result};

/// Serialized shape of installation state.
///
/// `BTreeMap` keeps keys sorted so the file is stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Steps that completed successfully.
    #[serde(default)]
    pub executed: BTreeMap<String, bool>,

    /// Resolved variable values.
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

/// Durable storage for a [`StateDocument`].
pub trait StateBackend {
    /// Human-readable location of the backing object.
    fn location(&self) -> PathBuf;

    /// Whether a durable object currently exists.
    fn exists(&self) -> bool;

    /// Read the stored document.
    fn load(&self) -> Result<StateDocument>;

    /// Replace the stored document. Must be durable when it returns.
    fn save(&mut self, doc: &StateDocument) -> Result<()>;
}

/// JSON file backend.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend bound to `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl StateBackend for JsonFileBackend {
    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<StateDocument> {
        if !self.path.exists() {
            return Err(InstallError::StateNotFound {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| InstallError::CorruptState {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Save using the write-to-temp-then-rename pattern. The temp file is
    /// synced before the rename and the directory after it, so the state
    /// file is either the old or the new document, even across power loss.
    fn save(&mut self, doc: &StateDocument) -> Result<()> {
        let dir = self.path.parent().filter(|d| !d.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(doc).map_err(anyhow::Error::from)?;

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        sync_dir(dir)?;

        Ok(())
    }
}

/// Flush a directory entry change (the rename) to disk.
#[cfg(unix)]
fn sync_dir(dir: Option<&Path>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: Option<&Path>) -> Result<()> {
    Ok(())
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    stored: Option<StateDocument>,
    saves: usize,
}

impl MemoryBackend {
    /// An empty backend with nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `doc`, as if a previous run saved it.
    pub fn with_document(doc: StateDocument) -> Self {
        Self {
            stored: Some(doc),
            saves: 0,
        }
    }

    /// The last saved document, if any.
    pub fn stored(&self) -> Option<&StateDocument> {
        self.stored.as_ref()
    }

    /// Number of saves performed.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StateBackend for MemoryBackend {
    fn location(&self) -> PathBuf {
        PathBuf::from("<memory>")
    }

    fn exists(&self) -> bool {
        self.stored.is_some()
    }

    fn load(&self) -> Result<StateDocument> {
        self.stored
            .clone()
            .ok_or_else(|| InstallError::StateNotFound {
                path: self.location(),
            })
    }

    fn save(&mut self, doc: &StateDocument) -> Result<()> {
        self.stored = Some(doc.clone());
        self.saves += 1;
        Ok(())
    }
}
