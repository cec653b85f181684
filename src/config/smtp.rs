// src/config/smtp.rs
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::consts::{SMTP_ENDPOINT_ENV, SMTP_PASSWORD_ENV, SMTP_USER_ENV};
use crate::error::ConfigError;

static ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<host>.+):(?P<port>\d+)$").expect("endpoint pattern compiles")
});

/// Mail relay settings, read from `WATCHER_SMTP_*`.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SmtpConfig::from_env`], with the variables coming from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnv(name));

        let (host, port) = parse_endpoint(&require(SMTP_ENDPOINT_ENV)?)?;
        Ok(Self {
            host,
            port,
            user: require(SMTP_USER_ENV)?,
            password: require(SMTP_PASSWORD_ENV)?,
        })
    }
}

// Keep the password out of logs.
impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// "smtp.example.org:465" → ("smtp.example.org", 465)
pub fn parse_endpoint(endpoint: &str) -> Result<(String, u16), ConfigError> {
    let malformed = || ConfigError::MalformedEndpoint(endpoint.to_string());

    let caps = ENDPOINT.captures(endpoint).ok_or_else(malformed)?;
    let port = caps["port"].parse::<u16>().map_err(|_| malformed())?;
    Ok((caps["host"].to_string(), port))
}
