use super::form::{IntakeDraft, IntakeField};
use crate::models::intake::{IntakeContent, VitalSigns};
use crate::validation::{self, FieldErrors};

pub const CHIEF_COMPLAINT_REQUIRED: &str = "A queixa principal é obrigatória";
pub const ILLNESS_HISTORY_REQUIRED: &str = "A história da doença é obrigatória";

/// Validate a complete intake draft.
///
/// Only the chief complaint and the illness history are required; every
/// other narrative field is nullable. Text is trimmed and empty optional
/// fields become null. The tenant and subject held by the draft are ignored:
/// they are attached from the caller's context by
/// [`IntakeContent::into_record`].
pub fn validate_intake(draft: &IntakeDraft) -> Result<IntakeContent, FieldErrors> {
    let mut errors = FieldErrors::new();

    let chief_complaint = validation::required(
        &mut errors,
        IntakeField::ChiefComplaint.path(),
        &draft.chief_complaint,
        CHIEF_COMPLAINT_REQUIRED,
    );
    let illness_history = validation::required(
        &mut errors,
        IntakeField::IllnessHistory.path(),
        &draft.illness_history,
        ILLNESS_HISTORY_REQUIRED,
    );

    let content = IntakeContent {
        chief_complaint,
        illness_history,
        personal_history: validation::optional(draft.personal_history.as_deref()),
        family_history: validation::optional(draft.family_history.as_deref()),
        medications: validation::optional(draft.medications.as_deref()),
        allergies: validation::optional(draft.allergies.as_deref()),
        vital_signs: VitalSigns {
            blood_pressure: validation::optional(draft.vital_signs.blood_pressure.as_deref()),
            heart_rate: validation::optional(draft.vital_signs.heart_rate.as_deref()),
            temperature: validation::optional(draft.vital_signs.temperature.as_deref()),
        },
        physical_exam: validation::optional(draft.physical_exam.as_deref()),
    };

    errors.into_result(content)
}
