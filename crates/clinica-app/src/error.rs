use thiserror::Error;

use clinica_auth::error::AuthError;
use clinica_core::error::CoreError;
use clinica_core::validation::FieldErrors;
use clinica_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Field-level errors, shown inline next to the inputs.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("missing context: {0}")]
    MissingContext(&'static str),

    /// The form is not on its last step or a save is already in flight.
    #[error("form cannot be submitted yet")]
    NotSubmittable,

    #[error(transparent)]
    Backend(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Unknown(e.to_string())
    }
}

impl AppError {
    /// Message suitable for a toast, in the interface language.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Verifique os campos destacados.".to_string(),
            AppError::MissingContext(what) => format!("{what} não encontrado"),
            AppError::NotSubmittable => "Conclua todas as etapas antes de salvar.".to_string(),
            AppError::Backend(StorageError::Api { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            AppError::Backend(StorageError::Network(_)) | AppError::Auth(AuthError::Network(_)) => {
                "Falha de conexão com o servidor.".to_string()
            }
            AppError::Backend(StorageError::NotFound { .. }) => {
                "Registro não encontrado.".to_string()
            }
            AppError::Auth(AuthError::InvalidCredentials) => {
                "Falha no login. Verifique suas credenciais.".to_string()
            }
            AppError::Auth(AuthError::AlreadyRegistered(_)) => {
                "Este email já está cadastrado.".to_string()
            }
            AppError::Auth(AuthError::Api { message, .. } | AuthError::AuthFailed(message))
                if !message.is_empty() =>
            {
                message.clone()
            }
            _ => "Erro desconhecido".to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
