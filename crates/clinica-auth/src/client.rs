use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::AuthError;

/// Connection to the hosted auth service at `{base_url}/auth/v1`.
#[derive(Debug, Clone)]
pub struct AuthClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, AuthError> {
        Ok(Self {
            http: build_client(anon_key)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

/// Build an HTTP client that sends the anon key on every request.
pub fn build_client(anon_key: &str) -> Result<reqwest::Client, AuthError> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(anon_key)
        .map_err(|e| AuthError::Config(format!("invalid anon key: {e}")))?;
    headers.insert("apikey", key);

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| AuthError::Config(e.to_string()))
}
