// src/lib.rs
//! Watch a page, email once when it triggers.
//!
//! One process invocation is one cycle (see [`runner::run`]); an external
//! scheduler decides how often that happens. Everything that has to survive
//! between invocations lives in the spec's state file ([`store`]).

#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod notify;
pub mod runner;
pub mod specs;
pub mod store;

pub use error::WatchError;
pub use runner::{Envelope, Outcome};
pub use specs::Spec;
pub use store::SpecState;
