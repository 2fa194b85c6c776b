use std::time::Duration;

use crate::constants::DEFAULT_REQUEST_TIMEOUT;

/// HTTP client with compression enabled and the default request timeout.
pub fn default_http_client() -> Result<reqwest::Client, reqwest::Error> {
    http_client(DEFAULT_REQUEST_TIMEOUT, None)
}

pub(crate) fn http_client(
    timeout: Duration,
    user_agent: Option<&str>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .timeout(timeout);
    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent);
    }
    builder.build()
}
