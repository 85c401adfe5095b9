use reqwest::header::AUTHORIZATION;
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::client::AuthClient;
use crate::error::AuthError;
use crate::session::{AuthUser, ProfileAttributes, Session};

/// Result of a sign-up attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpResult {
    /// The account is active and signed in.
    Session(Session),
    /// The account exists but must be confirmed by email before sign-in.
    ConfirmationRequired { user: AuthUser },
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self) -> Result<Session, AuthError> {
        let expires_at = match self.expires_at {
            Some(secs) => jiff::Timestamp::from_second(secs),
            None => jiff::Timestamp::now().checked_add(jiff::SignedDuration::from_secs(self.expires_in)),
        }
        .map_err(|e| AuthError::InvalidToken(format!("bad expiry: {e}")))?;

        Ok(Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        })
    }
}

/// Sign-up answers with a session when auto-confirm is on, else a bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

/// Sign in with email and password.
pub async fn sign_in(client: &AuthClient, email: &str, password: &str) -> Result<Session, AuthError> {
    info!(email, "signing in");

    let resp = client
        .http
        .post(client.endpoint("token"))
        .query(&[("grant_type", "password")])
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    let token: TokenResponse = check(resp).await?.json().await?;
    token.into_session()
}

/// Create an account carrying `attrs` as user metadata.
pub async fn sign_up(
    client: &AuthClient,
    email: &str,
    password: &str,
    attrs: &ProfileAttributes,
) -> Result<SignUpResult, AuthError> {
    info!(email, tenant_id = %attrs.tenant_id, "signing up");

    let resp = client
        .http
        .post(client.endpoint("signup"))
        .json(&json!({ "email": email, "password": password, "data": attrs }))
        .send()
        .await?;

    match check(resp).await?.json::<SignUpResponse>().await? {
        SignUpResponse::Session(token) => Ok(SignUpResult::Session(token.into_session()?)),
        SignUpResponse::User(user) => Ok(SignUpResult::ConfirmationRequired { user }),
    }
}

/// Exchange a refresh token for a new session.
pub async fn refresh_session(client: &AuthClient, refresh_token: &str) -> Result<Session, AuthError> {
    let resp = client
        .http
        .post(client.endpoint("token"))
        .query(&[("grant_type", "refresh_token")])
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await?;

    let token: TokenResponse = check(resp).await?.json().await?;
    token.into_session()
}

/// Revoke the session's refresh tokens.
pub async fn sign_out(client: &AuthClient, access_token: &str) -> Result<(), AuthError> {
    let resp = client
        .http
        .post(client.endpoint("logout"))
        .header(AUTHORIZATION, format!("Bearer {access_token}"))
        .send()
        .await?;
    check(resp).await?;
    Ok(())
}

async fn check(resp: Response) -> Result<Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorBody>(&text).ok();
    let code = body.as_ref().and_then(|b| b.error_code.clone());
    let message = body
        .and_then(|b| b.error_description.or(b.msg).or(b.message))
        .unwrap_or(text);
    warn!(status = status.as_u16(), message = %message, "auth request failed");

    match code.as_deref() {
        Some("invalid_credentials") => Err(AuthError::InvalidCredentials),
        Some("user_already_exists") => Err(AuthError::AlreadyRegistered(message)),
        _ => Err(AuthError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}
