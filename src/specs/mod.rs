// src/specs/mod.rs
//! # Watched-target "specs"
//!
//! A spec is one watched condition plus the email that announces it. Each
//! spec answers a single question per run: *has the watched thing reached its
//! active state?* If it has, the spec also knows what to tell the recipients.
//!
//! ## What lives here
//! - The [`Spec`] capability (`name`, `reached_active_state`,
//!   `render_email_message`).
//! - [`TwoStateSpec`], which pairs any spec with a state file and owns the
//!   passive → active lifecycle (`open`, `need_to_notify`, `close`).
//! - The closed set of concrete targets ([`Target`]): [`raketa`] and the
//!   generic [`page`] watcher. A new target is a new module plus a new
//!   `Target` variant.
//!
//! ## What does **not** live here
//! - **Mail transport** (`notify`) and **cycle orchestration** (`runner`).
//! - **Argument parsing**; `cli` builds targets from its subcommands.
//!
//! ## Conventions
//! - `reached_active_state` may do network I/O; any failure is returned, never
//!   treated as "not reached".
//! - `render_email_message` is deterministic for a given spec value.

pub mod page;
pub mod raketa;
pub mod two_state;

use crate::error::CheckError;
use crate::notify::EmailMessage;

pub use page::{PageWatch, Trigger};
pub use raketa::Raketa;
pub use two_state::TwoStateSpec;

pub trait Spec {
    /// Stable identifier, used for dispatch and logs.
    fn name(&self) -> &str;

    /// Has the watched condition become active?
    fn reached_active_state(&self) -> Result<bool, CheckError>;

    /// Fill in subject and body. The envelope is already set.
    fn render_email_message(&self, message: &mut EmailMessage);
}

/// Every target the binary knows how to watch.
#[derive(Clone, Debug)]
pub enum Target {
    Raketa(Raketa),
    Page(PageWatch),
}

impl Spec for Target {
    fn name(&self) -> &str {
        match self {
            Target::Raketa(s) => s.name(),
            Target::Page(s) => s.name(),
        }
    }

    fn reached_active_state(&self) -> Result<bool, CheckError> {
        match self {
            Target::Raketa(s) => s.reached_active_state(),
            Target::Page(s) => s.reached_active_state(),
        }
    }

    fn render_email_message(&self, message: &mut EmailMessage) {
        match self {
            Target::Raketa(s) => s.render_email_message(message),
            Target::Page(s) => s.render_email_message(message),
        }
    }
}
