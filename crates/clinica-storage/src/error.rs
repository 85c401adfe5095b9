use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("row not found in {table}: {id}")]
    NotFound { table: String, id: String },

    #[error("backend rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid row: {0}")]
    InvalidRow(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => StorageError::Api {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => StorageError::Network(e.to_string()),
        }
    }
}
