use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The organisation that owns and scopes every other row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tenant {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "ramo")]
    pub industry: String,
    #[serde(rename = "criado_em")]
    pub created_at: jiff::Timestamp,
}

/// Insert payload for [`Tenant`]; id and timestamp are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTenant {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "ramo")]
    pub industry: String,
}

/// Lines of business offered at registration, as `(value, label)`.
pub const INDUSTRIES: [(&str, &str); 11] = [
    ("psiquiatria", "Psiquiatria"),
    ("psicologia", "Psicologia"),
    ("odontologia", "Odontologia"),
    ("fisioterapia", "Fisioterapia"),
    ("nutrição", "Nutrição"),
    ("fonoaudiologia", "Fonoaudiologia"),
    ("terapia_ocupacional", "Terapia Capilar"),
    ("estetica", "Estética"),
    ("dermatologia", "Dermatologia"),
    ("acupuntura", "Acupuntura"),
    ("outro", "Outro"),
];
