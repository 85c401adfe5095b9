use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A persisted clinical intake ("anamnese"). Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeRecord {
    pub id: Uuid,
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "paciente_id")]
    pub subject_id: Uuid,
    #[serde(flatten)]
    pub content: IntakeContent,
    #[serde(rename = "criado_em")]
    pub created_at: jiff::Timestamp,
}

/// Insert payload. Tenant and subject always come from the caller's context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewIntakeRecord {
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "paciente_id")]
    pub subject_id: Uuid,
    #[serde(flatten)]
    pub content: IntakeContent,
}

/// The validated, normalised clinical content of an intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeContent {
    #[serde(rename = "queixa_principal")]
    pub chief_complaint: String,
    #[serde(rename = "historia_doenca")]
    pub illness_history: String,
    #[serde(rename = "antecedentes_pessoais", default)]
    pub personal_history: Option<String>,
    #[serde(rename = "antecedentes_familiares", default)]
    pub family_history: Option<String>,
    #[serde(rename = "medicamentos", default)]
    pub medications: Option<String>,
    #[serde(rename = "alergias", default)]
    pub allergies: Option<String>,
    #[serde(rename = "sinais_vitais", default)]
    pub vital_signs: VitalSigns,
    #[serde(rename = "exame_fisico", default)]
    pub physical_exam: Option<String>,
}

/// Always a complete object; each measurement may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalSigns {
    #[serde(rename = "pressao_arterial")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "frequencia_cardiaca")]
    pub heart_rate: Option<String>,
    #[serde(rename = "temperatura")]
    pub temperature: Option<String>,
}

impl IntakeContent {
    /// Attach the identifiers taken from the session and the page, never from
    /// client-editable form state.
    pub fn into_record(self, tenant_id: Uuid, subject_id: Uuid) -> NewIntakeRecord {
        NewIntakeRecord {
            tenant_id,
            subject_id,
            content: self,
        }
    }
}
