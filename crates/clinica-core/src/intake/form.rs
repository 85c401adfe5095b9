use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::schema::validate_intake;
use super::step::{self, IntakeStep, StepAction};
use crate::models::intake::IntakeContent;
use crate::validation::FieldErrors;

/// Raw form values, exactly as typed. Holds every field regardless of step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeDraft {
    /// Defaults supplied by the caller. Never read at submission; the
    /// stored record takes its ids from the submitting context.
    pub tenant_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub chief_complaint: String,
    pub illness_history: String,
    pub personal_history: Option<String>,
    pub family_history: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub vital_signs: VitalSignsDraft,
    pub physical_exam: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalSignsDraft {
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<String>,
    pub temperature: Option<String>,
}

/// Every editable field of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IntakeField {
    ChiefComplaint,
    IllnessHistory,
    PersonalHistory,
    FamilyHistory,
    Medications,
    Allergies,
    BloodPressure,
    HeartRate,
    Temperature,
    PhysicalExam,
}

impl IntakeField {
    pub const ALL: [IntakeField; 10] = [
        Self::ChiefComplaint,
        Self::IllnessHistory,
        Self::PersonalHistory,
        Self::FamilyHistory,
        Self::Medications,
        Self::Allergies,
        Self::BloodPressure,
        Self::HeartRate,
        Self::Temperature,
        Self::PhysicalExam,
    ];

    /// Path used as the key in [`FieldErrors`].
    pub fn path(self) -> &'static str {
        match self {
            Self::ChiefComplaint => "chief_complaint",
            Self::IllnessHistory => "illness_history",
            Self::PersonalHistory => "personal_history",
            Self::FamilyHistory => "family_history",
            Self::Medications => "medications",
            Self::Allergies => "allergies",
            Self::BloodPressure => "vital_signs.blood_pressure",
            Self::HeartRate => "vital_signs.heart_rate",
            Self::Temperature => "vital_signs.temperature",
            Self::PhysicalExam => "physical_exam",
        }
    }

    /// The step on which this field is shown.
    pub fn step(self) -> IntakeStep {
        match self {
            Self::ChiefComplaint | Self::IllnessHistory => IntakeStep::Complaint,
            Self::PersonalHistory | Self::FamilyHistory | Self::Medications | Self::Allergies => {
                IntakeStep::History
            }
            Self::BloodPressure | Self::HeartRate | Self::Temperature | Self::PhysicalExam => {
                IntakeStep::PhysicalExam
            }
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::ChiefComplaint | Self::IllnessHistory)
    }
}

impl IntakeDraft {
    pub fn get(&self, field: IntakeField) -> Option<&str> {
        match field {
            IntakeField::ChiefComplaint => Some(&self.chief_complaint),
            IntakeField::IllnessHistory => Some(&self.illness_history),
            IntakeField::PersonalHistory => self.personal_history.as_deref(),
            IntakeField::FamilyHistory => self.family_history.as_deref(),
            IntakeField::Medications => self.medications.as_deref(),
            IntakeField::Allergies => self.allergies.as_deref(),
            IntakeField::BloodPressure => self.vital_signs.blood_pressure.as_deref(),
            IntakeField::HeartRate => self.vital_signs.heart_rate.as_deref(),
            IntakeField::Temperature => self.vital_signs.temperature.as_deref(),
            IntakeField::PhysicalExam => self.physical_exam.as_deref(),
        }
    }

    pub fn set(&mut self, field: IntakeField, value: String) {
        match field {
            IntakeField::ChiefComplaint => self.chief_complaint = value,
            IntakeField::IllnessHistory => self.illness_history = value,
            IntakeField::PersonalHistory => self.personal_history = Some(value),
            IntakeField::FamilyHistory => self.family_history = Some(value),
            IntakeField::Medications => self.medications = Some(value),
            IntakeField::Allergies => self.allergies = Some(value),
            IntakeField::BloodPressure => self.vital_signs.blood_pressure = Some(value),
            IntakeField::HeartRate => self.vital_signs.heart_rate = Some(value),
            IntakeField::Temperature => self.vital_signs.temperature = Some(value),
            IntakeField::PhysicalExam => self.physical_exam = Some(value),
        }
    }
}

/// Form state for one "new intake" flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeForm {
    draft: IntakeDraft,
    step: IntakeStep,
    errors: FieldErrors,
    submitting: bool,
}

impl IntakeForm {
    /// Fresh form with defaults merged with the caller's identifiers.
    pub fn new(tenant_id: Option<Uuid>, subject_id: Uuid) -> Self {
        Self {
            draft: IntakeDraft {
                tenant_id,
                subject_id: Some(subject_id),
                ..IntakeDraft::default()
            },
            step: IntakeStep::Complaint,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &IntakeDraft {
        &self.draft
    }

    /// Mutable access for hosts that bind the whole draft at once.
    pub fn draft_mut(&mut self) -> &mut IntakeDraft {
        &mut self.draft
    }

    pub fn value(&self, field: IntakeField) -> Option<&str> {
        self.draft.get(field)
    }

    /// Set a field's raw value and clear its pending error.
    pub fn set(&mut self, field: IntakeField, value: impl Into<String>) {
        self.draft.set(field, value.into());
        self.errors.remove(field.path());
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn dispatch(&mut self, action: StepAction) -> IntakeStep {
        self.step = step::reduce(self.step, action);
        self.step
    }

    /// Fields editable on the current step.
    pub fn visible_fields(&self) -> impl Iterator<Item = IntakeField> + '_ {
        IntakeField::ALL
            .into_iter()
            .filter(move |f| f.step() == self.step)
    }

    pub fn error(&self, field: IntakeField) -> Option<&str> {
        self.errors.get(field.path())
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate the whole draft, keeping the errors for inline display.
    pub fn validate(&mut self) -> Result<IntakeContent, FieldErrors> {
        match validate_intake(&self.draft) {
            Ok(content) => {
                self.errors.clear();
                Ok(content)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Disables the submit control while a persistence call is in flight.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Submit is offered only on the last step and not while in flight.
    pub fn can_submit(&self) -> bool {
        self.step.is_last() && !self.submitting
    }
}
