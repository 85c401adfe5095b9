use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::StorageError;

/// Build an HTTP client that sends the project's anon key on every request.
///
/// No request timeout is configured; the transport's own defaults apply.
pub fn build_client(anon_key: &str) -> Result<reqwest::Client, StorageError> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(anon_key)
        .map_err(|e| StorageError::Config(format!("invalid anon key: {e}")))?;
    headers.insert("apikey", key);

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(concat!("clinica/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| StorageError::Config(e.to_string()))
}
