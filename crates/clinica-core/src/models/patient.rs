use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Demographic and contact profile of a patient, keyed by tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(flatten)]
    pub details: PatientDetails,
    #[serde(rename = "criado_em")]
    pub created_at: jiff::Timestamp,
}

/// Everything the patient form edits. Serialised as-is for updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientDetails {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: jiff::civil::Date,
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(default)]
    pub rg: Option<String>,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(rename = "estado_civil", default)]
    pub marital_status: Option<MaritalStatus>,
    #[serde(rename = "profissao", default)]
    pub profession: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "telefone_secundario", default)]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "endereco")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", default)]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "convenio", default)]
    pub insurance: Option<String>,
    #[serde(rename = "numero_carteirinha", default)]
    pub insurance_card_number: Option<String>,
    #[serde(rename = "validade_carteirinha", default)]
    pub insurance_card_expiry: Option<jiff::civil::Date>,
    #[serde(rename = "contato_emergencia", default)]
    pub emergency_contact: Option<String>,
    #[serde(rename = "telefone_emergencia", default)]
    pub emergency_phone: Option<String>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

/// Insert/update payload: the form's details plus the session's tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientInput {
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(flatten)]
    pub details: PatientDetails,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Sex {
    #[default]
    #[serde(rename = "masculino")]
    Male,
    #[serde(rename = "feminino")]
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MaritalStatus {
    #[serde(rename = "solteiro")]
    Single,
    #[serde(rename = "casado")]
    Married,
    #[serde(rename = "divorciado")]
    Divorced,
    #[serde(rename = "viuvo")]
    Widowed,
}

impl Sex {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "masculino" => Some(Self::Male),
            "feminino" => Some(Self::Female),
            _ => None,
        }
    }
}

impl MaritalStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "solteiro" => Some(Self::Single),
            "casado" => Some(Self::Married),
            "divorciado" => Some(Self::Divorced),
            "viuvo" => Some(Self::Widowed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "solteiro",
            Self::Married => "casado",
            Self::Divorced => "divorciado",
            Self::Widowed => "viuvo",
        }
    }
}
