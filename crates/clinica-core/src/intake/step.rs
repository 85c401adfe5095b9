use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which section of the intake is currently editable. UI-only, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IntakeStep {
    #[default]
    Complaint,
    History,
    PhysicalExam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StepAction {
    Next,
    Back,
    Reset,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 3] = [Self::Complaint, Self::History, Self::PhysicalExam];

    /// 1-based position, as shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::Complaint => 1,
            Self::History => 2,
            Self::PhysicalExam => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Complaint => "Queixa Principal",
            Self::History => "História Clínica",
            Self::PhysicalExam => "Exame Físico",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Complaint => Some(Self::History),
            Self::History => Some(Self::PhysicalExam),
            Self::PhysicalExam => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Complaint => None,
            Self::History => Some(Self::Complaint),
            Self::PhysicalExam => Some(Self::History),
        }
    }

    pub fn is_first(self) -> bool {
        self.previous().is_none()
    }

    /// Submission is only offered from the last step.
    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Whether the progress indicator marks `step` as reached.
    pub fn has_reached(self, step: IntakeStep) -> bool {
        self.number() >= step.number()
    }
}

/// Pure transition function. Moves past either end are ignored.
pub fn reduce(step: IntakeStep, action: StepAction) -> IntakeStep {
    match action {
        StepAction::Next => step.next().unwrap_or(step),
        StepAction::Back => step.previous().unwrap_or(step),
        StepAction::Reset => IntakeStep::Complaint,
    }
}
