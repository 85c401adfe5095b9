use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::appointment::{AppointmentStatus, ConsultationType, NewAppointment};
use crate::validation::{self, FieldErrors};

/// State of the booking side panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppointmentDraft {
    pub patient_id: Option<Uuid>,
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub consultation_type: Option<ConsultationType>,
    pub notes: String,
}

impl AppointmentDraft {
    /// Panel opened by clicking a calendar cell.
    pub fn for_slot(date: Date, time: Time) -> Self {
        Self {
            date: Some(date),
            time: Some(time),
            ..Self::default()
        }
    }
}

/// Validate the panel and build a pending appointment for `user_id`.
///
/// The slot is interpreted in `tz`, the zone the calendar is rendered in.
pub fn validate_appointment(
    draft: &AppointmentDraft,
    tenant_id: Uuid,
    user_id: Uuid,
    tz: &TimeZone,
) -> Result<NewAppointment, FieldErrors> {
    let mut errors = FieldErrors::new();
    if draft.patient_id.is_none() {
        errors.insert("patient_id", "Selecione um paciente");
    }
    if draft.date.is_none() || draft.time.is_none() {
        errors.insert("slot", "Selecione um horário");
    }

    let (Some(subject_id), Some(date), Some(time)) = (draft.patient_id, draft.date, draft.time)
    else {
        return Err(errors);
    };

    let scheduled_at = match date.to_datetime(time).to_zoned(tz.clone()) {
        Ok(zoned) => zoned.timestamp(),
        Err(_) => {
            errors.insert("slot", "Horário inválido");
            return Err(errors);
        }
    };

    errors.into_result(NewAppointment {
        tenant_id,
        user_id,
        subject_id,
        scheduled_at,
        service_type: draft
            .consultation_type
            .map(|kind| kind.as_str().to_string()),
        status: Some(AppointmentStatus::Pending),
        notes: validation::optional(Some(&draft.notes)),
    })
}
