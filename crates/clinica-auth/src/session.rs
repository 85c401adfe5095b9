use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session as returned by sign-in, sign-up or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: jiff::Timestamp,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now: jiff::Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Tenant recorded on the user at sign-up, if any.
    pub fn tenant_id(&self) -> Option<Uuid> {
        self.user.metadata.tenant_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "user_metadata", default)]
    pub metadata: UserMetadata,
}

/// Free-form attributes stored on the auth user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(rename = "empresa_id", default)]
    pub tenant_id: Option<Uuid>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "cargo", default)]
    pub role: Option<String>,
}

/// Attributes attached to a new account at sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAttributes {
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub role: String,
}

impl From<&ProfileAttributes> for UserMetadata {
    fn from(attrs: &ProfileAttributes) -> Self {
        Self {
            tenant_id: Some(attrs.tenant_id),
            name: Some(attrs.name.clone()),
            role: Some(attrs.role.clone()),
        }
    }
}
