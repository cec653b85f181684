// src/specs/two_state.rs
use std::path::{Path, PathBuf};

use crate::error::{CheckError, WatchError};
use crate::store::{self, SpecState};

use super::Spec;

/// A spec bound to its state file for the length of one run.
///
/// `open` loads the flag, `need_to_notify` runs the check (at most once, and
/// only while passive), `close` writes the flag back. Nothing is written
/// unless `close` is called, so a run that fails halfway leaves the file as it
/// was and the next run tries again.
pub struct TwoStateSpec<'a, S: Spec + ?Sized> {
    spec: &'a S,
    state_file: PathBuf,
    state: SpecState,
    checked: bool,
}

impl<'a, S: Spec + ?Sized> TwoStateSpec<'a, S> {
    pub fn open(spec: &'a S, state_file: &Path) -> Result<Self, WatchError> {
        let state = store::load(state_file)?;
        logd!("State: {} loaded {:?} from {}", spec.name(), state, state_file.display());
        Ok(Self { spec, state_file: state_file.to_path_buf(), state, checked: false })
    }

    pub fn spec(&self) -> &S {
        self.spec
    }

    pub fn state(&self) -> SpecState {
        self.state
    }

    /// True exactly when this call moved the spec from passive to active.
    ///
    /// An active spec is not checked at all. A second call in the same run
    /// returns false without checking again.
    pub fn need_to_notify(&mut self) -> Result<bool, CheckError> {
        if self.state.is_active() {
            logf!("Spec {} already active, skipping check", self.spec.name());
            return Ok(false);
        }
        if self.checked {
            return Ok(false);
        }
        self.checked = true;

        let reached = self.spec.reached_active_state()?;
        logf!("Spec {} reached active state: {}", self.spec.name(), reached);
        if reached {
            self.state = SpecState::Active;
        }
        Ok(reached)
    }

    /// Persist the in-memory state.
    pub fn close(self) -> Result<SpecState, WatchError> {
        store::save(&self.state_file, self.state)?;
        logd!("State: {} saved {:?} to {}", self.spec.name(), self.state, self.state_file.display());
        Ok(self.state)
    }

    /// Open, run `body`, and close only if `body` succeeded.
    ///
    /// On error the state file is left untouched.
    pub fn scoped<T, F>(spec: &'a S, state_file: &Path, body: F) -> Result<T, WatchError>
    where
        F: FnOnce(&mut Self) -> Result<T, WatchError>,
    {
        let mut opened = Self::open(spec, state_file)?;
        match body(&mut opened) {
            Ok(value) => {
                opened.close()?;
                Ok(value)
            }
            Err(e) => {
                logw!(
                    "State: {} not persisted ({} kept at its previous value)",
                    spec.name(),
                    state_file.display()
                );
                Err(e)
            }
        }
    }
}
