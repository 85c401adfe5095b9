use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("date arithmetic error: {0}")]
    Date(#[from] jiff::Error),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown route: {0}")]
    UnknownRoute(String),
}
