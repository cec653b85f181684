// src/config/consts.rs

// SMTP environment
pub const SMTP_USER_ENV: &str = "WATCHER_SMTP_USER";
pub const SMTP_PASSWORD_ENV: &str = "WATCHER_SMTP_PASSWORD";
pub const SMTP_ENDPOINT_ENV: &str = "WATCHER_SMTP_ENDPOINT";

// Net config
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = concat!("watcher/", env!("CARGO_PKG_VERSION"));

// Logging
pub const LOG_ENV: &str = "WATCHER_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

// State file encoding
pub const PASSIVE_CHAR: char = '0';
pub const ACTIVE_CHAR: char = '1';
