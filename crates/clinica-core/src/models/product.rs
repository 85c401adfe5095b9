use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: Uuid,
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "codigo_cor", default)]
    pub color_code: Option<String>,
    #[serde(rename = "criado_em", default)]
    pub created_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "codigo_cor")]
    pub color_code: Option<String>,
}
