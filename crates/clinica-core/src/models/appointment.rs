use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: Uuid,
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    /// The professional the appointment is booked with.
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(rename = "cliente_id")]
    pub subject_id: Uuid,
    #[serde(rename = "data_agendamento")]
    pub scheduled_at: jiff::Timestamp,
    #[serde(rename = "tipo_servico", default)]
    pub service_type: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "criado_em")]
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewAppointment {
    #[serde(rename = "empresa_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(rename = "cliente_id")]
    pub subject_id: Uuid,
    #[serde(rename = "data_agendamento")]
    pub scheduled_at: jiff::Timestamp,
    #[serde(rename = "tipo_servico")]
    pub service_type: Option<String>,
    #[ts(as = "Option<String>")]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

/// Status column. Unknown values written by other clients are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Other(String),
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pendente" => Self::Pending,
            "confirmado" => Self::Confirmed,
            "cancelado" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pendente"),
            Self::Confirmed => f.write_str("confirmado"),
            Self::Cancelled => f.write_str("cancelado"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// Consultation types offered by the booking panel; stored as `tipo_servico`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConsultationType {
    PrimeiraConsulta,
    Retorno,
    Exame,
}

impl ConsultationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimeiraConsulta => "primeira_consulta",
            Self::Retorno => "retorno",
            Self::Exame => "exame",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PrimeiraConsulta => "Primeira Consulta",
            Self::Retorno => "Retorno",
            Self::Exame => "Exame",
        }
    }
}
