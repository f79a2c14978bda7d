//! State management for installation progress.
//!
//! This module provides persistent state storage, tracking which steps
//! completed and which variable values were supplied.

pub mod backend;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StateBackend, StateDocument};
pub use store::StateStore;

use std::path::{Path, PathBuf};

/// Default state file location for a script: `config-<file name>.json`
/// in the script's directory.
pub fn default_state_path(script: &Path) -> PathBuf {
    let file_name = script
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = script.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("config-{}.json", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_path_sits_next_to_script() {
        assert_eq!(
            default_state_path(Path::new("/srv/setup.sh")),
            PathBuf::from("/srv/config-setup.sh.json")
        );
    }

    #[test]
    fn default_state_path_for_relative_script() {
        assert_eq!(
            default_state_path(Path::new("install.sh")),
            PathBuf::from("config-install.sh.json")
        );
    }
}
