use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use jiff::{SignedDuration, Timestamp};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::flows::SignUpResult;
use crate::jwt::{self, SessionClaims, AUDIENCE};
use crate::provider::AuthProvider;
use crate::session::{AuthUser, ProfileAttributes, Session, UserMetadata};

const DEFAULT_TTL: SignedDuration = SignedDuration::from_hours(1);

struct Account {
    password: String,
    user: AuthUser,
    confirmed: bool,
}

/// In-process identity provider issuing real HS256 tokens.
///
/// Accounts live only as long as the value. Used by tests and the demo binary.
pub struct MemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    refresh_tokens: RwLock<HashMap<String, String>>,
    secret: Vec<u8>,
    require_confirmation: AtomicBool,
    offline: AtomicBool,
}

impl MemoryAuthProvider {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            refresh_tokens: RwLock::new(HashMap::new()),
            secret: secret.into(),
            require_confirmation: AtomicBool::new(false),
            offline: AtomicBool::new(false),
        }
    }

    /// When set, new accounts must be confirmed before they can sign in.
    pub fn set_require_confirmation(&self, required: bool) {
        self.require_confirmation.store(required, Ordering::SeqCst);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Register a confirmed account directly.
    pub async fn add_user(&self, email: &str, password: &str, metadata: UserMetadata) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            metadata,
        };
        self.accounts.write().await.insert(
            normalise(email),
            Account {
                password: password.to_string(),
                user: user.clone(),
                confirmed: true,
            },
        );
        user
    }

    /// Mark an account as confirmed. Returns false when no such account exists.
    pub async fn confirm(&self, email: &str) -> bool {
        match self.accounts.write().await.get_mut(&normalise(email)) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Network("auth service unreachable".to_string()));
        }
        Ok(())
    }

    async fn issue_session(&self, user: AuthUser) -> Result<Session, AuthError> {
        let now = Timestamp::now();
        let expires_at = now
            .checked_add(DEFAULT_TTL)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let claims = SessionClaims {
            sub: user.id,
            exp: expires_at.as_second(),
            iat: now.as_second(),
            aud: Some(AUDIENCE.to_string()),
            email: user.email.clone(),
            role: Some(AUDIENCE.to_string()),
            user_metadata: user.metadata.clone(),
        };
        let access_token = jwt::issue_token(&claims, &self.secret)?;
        let refresh_token = Uuid::new_v4().simple().to_string();

        let email = user.email.as_deref().map(normalise).unwrap_or_default();
        self.refresh_tokens
            .write()
            .await
            .insert(refresh_token.clone(), email);

        Ok(Session {
            access_token,
            refresh_token,
            expires_at,
            user,
        })
    }
}

impl AuthProvider for MemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.check_online()?;
        let user = {
            let accounts = self.accounts.read().await;
            let account = accounts
                .get(&normalise(email))
                .filter(|a| a.password == password)
                .ok_or(AuthError::InvalidCredentials)?;
            if !account.confirmed {
                return Err(AuthError::AuthFailed("Email not confirmed".to_string()));
            }
            account.user.clone()
        };
        debug!(user_id = %user.id, "memory sign-in");
        self.issue_session(user).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attrs: &ProfileAttributes,
    ) -> Result<SignUpResult, AuthError> {
        self.check_online()?;
        let key = normalise(email);
        let confirmed = !self.require_confirmation.load(Ordering::SeqCst);
        let user = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AuthError::AlreadyRegistered(email.to_string()));
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: Some(email.trim().to_string()),
                metadata: UserMetadata::from(attrs),
            };
            accounts.insert(
                key,
                Account {
                    password: password.to_string(),
                    user: user.clone(),
                    confirmed,
                },
            );
            user
        };
        debug!(user_id = %user.id, confirmed, "memory sign-up");

        if confirmed {
            Ok(SignUpResult::Session(self.issue_session(user).await?))
        } else {
            Ok(SignUpResult::ConfirmationRequired { user })
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.check_online()?;
        let email = self
            .refresh_tokens
            .write()
            .await
            .remove(refresh_token)
            .ok_or_else(|| AuthError::InvalidToken("unknown refresh token".to_string()))?;
        let user = self
            .accounts
            .read()
            .await
            .get(&email)
            .map(|a| a.user.clone())
            .ok_or_else(|| AuthError::InvalidToken("account no longer exists".to_string()))?;
        self.issue_session(user).await
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        self.check_online()?;
        self.refresh_tokens
            .write()
            .await
            .remove(&session.refresh_token);
        Ok(())
    }
}

fn normalise(email: &str) -> String {
    email.trim().to_lowercase()
}
