use std::sync::{Arc, RwLock};

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::client;
use crate::error::StorageError;
use crate::query::Query;

/// Backend speaking PostgREST at `{base_url}/rest/v1`.
///
/// Clones share the access token.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Arc<RwLock<Option<String>>>,
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RestBackend {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, StorageError> {
        Ok(Self {
            http: client::build_client(anon_key)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, StorageError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        let bearer = self
            .access_token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        let auth = HeaderValue::from_str(&format!("Bearer {bearer}"))
            .map_err(|e| StorageError::Config(format!("invalid bearer token: {e}")))?;
        Ok(self.http.request(method, url).header(AUTHORIZATION, auth))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => [body.message, body.details, body.hint]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => text,
        };
        warn!(status = status.as_u16(), message = %message, "backend request failed");
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Backend for RestBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, StorageError> {
        debug!(table = query.table_name(), "select");
        let request = self
            .request(Method::GET, query.table_name())?
            .query(&query.to_query_pairs());
        let rows = self.send(request).await?.json::<Vec<Value>>().await?;
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StorageError> {
        debug!(table, "insert");
        let request = self
            .request(Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(&row);
        let mut rows = self.send(request).await?.json::<Vec<Value>>().await?;
        if rows.is_empty() {
            return Err(StorageError::InvalidRow(format!(
                "insert into {table} returned no row"
            )));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, StorageError> {
        debug!(table = query.table_name(), "update");
        let request = self
            .request(Method::PATCH, query.table_name())?
            .query(&filter_pairs(query))
            .header("Prefer", "return=representation")
            .json(&patch);
        let rows = self.send(request).await?.json::<Vec<Value>>().await?;
        Ok(rows)
    }

    async fn delete(&self, query: &Query) -> Result<usize, StorageError> {
        debug!(table = query.table_name(), "delete");
        let request = self
            .request(Method::DELETE, query.table_name())?
            .query(&filter_pairs(query))
            .header("Prefer", "return=representation");
        let rows = self.send(request).await?.json::<Vec<Value>>().await?;
        Ok(rows.len())
    }

    /// Requests carry the user's token so row-level policies apply.
    fn authorize(&self, access_token: Option<&str>) {
        if let Ok(mut token) = self.access_token.write() {
            *token = access_token.map(str::to_string);
        }
    }
}

/// Mutations take filters only; `select`, `order` and `limit` do not apply.
fn filter_pairs(query: &Query) -> Vec<(String, String)> {
    query
        .to_query_pairs()
        .into_iter()
        .filter(|(key, _)| !matches!(key.as_str(), "select" | "order" | "limit"))
        .collect()
}
