use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("user already registered: {0}")]
    AlreadyRegistered(String),

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("auth service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("auth config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => AuthError::Api {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => AuthError::Network(e.to_string()),
        }
    }
}
