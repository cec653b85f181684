// src/core/net.rs

// Blocking HTTP GET. No retries; a failed fetch fails the run.

use std::time::Duration;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::CheckError;

/// GET `url` and return the body as text.
/// Any non-2xx status is an error; redirects are followed.
pub fn http_get(url: &str) -> Result<String, CheckError> {
    let http = |source| CheckError::Http { url: url.to_string(), source };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(http)?;

    let resp = client.get(url).send().map_err(http)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(CheckError::Status { url: url.to_string(), status: status.as_u16() });
    }

    logd!("GET {} → {}", url, status);
    resp.text().map_err(http)
}
