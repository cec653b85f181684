// src/store.rs
//! On-disk triggered/untriggered flag.
//!
//! The file holds a single character: `0` for [`SpecState::Passive`], `1` for
//! [`SpecState::Active`]. A missing file reads as passive.
//!
//! Writes are a plain overwrite (no temp file + rename, no fsync). A crash in
//! the middle of [`save`] can leave an empty or truncated file, which the next
//! [`load`] reports as a format error instead of guessing.

use std::{fs, io, path::Path};

use crate::config::consts::{ACTIVE_CHAR, PASSIVE_CHAR};
use crate::error::StateError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpecState {
    /// Not triggered yet; the condition is still checked on every run.
    #[default]
    Passive,
    /// Notification already sent. Never goes back to passive.
    Active,
}

impl SpecState {
    pub fn as_char(self) -> char {
        match self {
            SpecState::Passive => PASSIVE_CHAR,
            SpecState::Active => ACTIVE_CHAR,
        }
    }

    /// Parse file content. Trailing whitespace (an editor's newline) is allowed.
    pub fn parse(content: &str) -> Option<Self> {
        let mut chars = content.trim_end().chars();
        let state = match chars.next()? {
            PASSIVE_CHAR => SpecState::Passive,
            ACTIVE_CHAR => SpecState::Active,
            _ => return None,
        };
        chars.next().is_none().then_some(state)
    }

    pub fn is_active(self) -> bool {
        self == SpecState::Active
    }
}

/// Read the state at `path`; passive when the file does not exist.
pub fn load(path: &Path) -> Result<SpecState, StateError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logd!("State: {} missing, defaulting to passive", path.display());
            return Ok(SpecState::Passive);
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            // not UTF-8: certainly not one of ours
            return Err(StateError::Format { path: path.to_path_buf(), content: read_lossy(path) });
        }
        Err(source) => return Err(StateError::Io { path: path.to_path_buf(), source }),
    };

    SpecState::parse(&content).ok_or_else(|| StateError::Format {
        path: path.to_path_buf(),
        content,
    })
}

/// Overwrite `path` with `state`, creating the parent directory if needed.
pub fn save(path: &Path, state: SpecState) -> Result<(), StateError> {
    let io_err = |source| StateError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    fs::write(path, state.as_char().to_string()).map_err(io_err)
}

fn read_lossy(path: &Path) -> String {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
