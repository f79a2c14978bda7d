//! Persistent installation state.
//!
//! [`StateStore`] records which steps completed and which variable values the
//! operator supplied. Every mutation is flushed to its backend before the
//! call returns, so a crash between steps never loses acknowledged progress.

use std::path::PathBuf;

use tracing::debug;

use super::backend::{JsonFileBackend, StateBackend, StateDocument};
use crate::error::Result;

/// Durable step and variable state for one installation.
#[derive(Debug)]
pub struct StateStore<B: StateBackend = JsonFileBackend> {
    doc: StateDocument,
    backend: B,
}

impl<B: StateBackend> StateStore<B> {
    /// Start a fresh installation bound to `backend`.
    ///
    /// Nothing is written until the first mutation.
    pub fn create(backend: B) -> Self {
        debug!("Creating new state at {}", backend.location().display());
        Self {
            doc: StateDocument::default(),
            backend,
        }
    }

    /// Resume an installation from `backend`.
    ///
    /// Fails with `StateNotFound` if nothing was stored yet and with
    /// `CorruptState` if the stored document cannot be parsed.
    pub fn open(backend: B) -> Result<Self> {
        let doc = backend.load()?;
        debug!(
            "Loaded state from {} ({} executed, {} vars)",
            backend.location().display(),
            doc.executed.len(),
            doc.vars.len()
        );
        Ok(Self { doc, backend })
    }

    /// Where this store persists to.
    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// The backend this store flushes to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current in-memory document.
    pub fn document(&self) -> &StateDocument {
        &self.doc
    }

    // --- Step State Tracking ---

    /// Check if a step already completed.
    pub fn is_completed(&self, name: &str) -> bool {
        self.doc.executed.contains_key(name)
    }

    /// Mark a step completed and flush.
    pub fn mark_completed(&mut self, name: &str) -> Result<()> {
        self.doc.executed.insert(name.to_string(), true);
        self.flush()
    }

    /// Names of completed steps, sorted.
    pub fn completed_steps(&self) -> impl Iterator<Item = &str> {
        self.doc.executed.keys().map(String::as_str)
    }

    // --- Variables ---

    /// Get a previously resolved variable.
    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.doc.vars.get(name).map(String::as_str)
    }

    /// Store a resolved variable and flush.
    pub fn set_variable(&mut self, name: &str, value: &str) -> Result<()> {
        self.doc.vars.insert(name.to_string(), value.to_string());
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.backend.save(&self.doc)
    }
}

impl StateStore<JsonFileBackend> {
    /// Start a fresh installation persisted as JSON at `path`.
    pub fn create_file(path: impl Into<PathBuf>) -> Self {
        Self::create(JsonFileBackend::new(path))
    }

    /// Resume an installation persisted as JSON at `path`.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(JsonFileBackend::new(path))
    }
}
