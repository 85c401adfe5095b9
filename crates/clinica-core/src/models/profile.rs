use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A staff member of a tenant. The id is the auth user id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    pub id: Uuid,
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "criado_em", default)]
    pub created_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileInput {
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub role: String,
}

/// Role given to the user who registers a tenant.
pub const ADMIN_ROLE: &str = "Administrador";
