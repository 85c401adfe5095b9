use std::future::Future;

use crate::client::AuthClient;
use crate::error::AuthError;
use crate::flows::{self, SignUpResult};
use crate::session::{ProfileAttributes, Session};

/// The identity operations the application depends on.
pub trait AuthProvider: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
        attrs: &ProfileAttributes,
    ) -> impl Future<Output = Result<SignUpResult, AuthError>> + Send;

    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_out(&self, session: &Session) -> impl Future<Output = Result<(), AuthError>> + Send;
}

impl AuthProvider for AuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        flows::sign_in(self, email, password).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attrs: &ProfileAttributes,
    ) -> Result<SignUpResult, AuthError> {
        flows::sign_up(self, email, password, attrs).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        flows::refresh_session(self, refresh_token).await
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        flows::sign_out(self, &session.access_token).await
    }
}
