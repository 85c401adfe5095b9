use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A subscription plan. Plans are global, not tenant-scoped.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Plan {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "max_usuarios")]
    pub max_users: i32,
    #[serde(rename = "recursos")]
    pub features: serde_json::Value,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "criado_em", default)]
    pub created_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlanInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "max_usuarios")]
    pub max_users: i32,
    #[serde(rename = "recursos")]
    pub features: serde_json::Value,
    #[serde(rename = "preco")]
    pub price: f64,
}
