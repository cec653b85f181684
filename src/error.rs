// src/error.rs
//! Error taxonomy for one watch cycle.
//!
//! Every failure is fatal for the run it happens in. The only thing that
//! differs between the kinds is *where* they come from; none of them leaves a
//! partially committed state behind.

use std::path::PathBuf;

use thiserror::Error;

/// Bad or missing configuration (CLI or environment).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("unsupported smtp endpoint format: {0:?} (expected host:port)")]
    MalformedEndpoint(String),

    #[error("invalid command line: {0}")]
    Arguments(String),
}

/// The watched condition could not be evaluated.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

/// The on-disk state flag could not be read or written.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("could not access state file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} has unrecognized content {content:?} (expected '0' or '1')", path.display())]
    Format { path: PathBuf, content: String },
}

/// The notification could not be built or handed to the relay.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("could not build email message")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport failed")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Anything that aborts a run.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("configuration error")]
    Config(#[from] ConfigError),

    #[error("condition check failed")]
    Check(#[from] CheckError),

    #[error("state persistence failed")]
    State(#[from] StateError),

    #[error("notification delivery failed")]
    Delivery(#[from] DeliveryError),
}
