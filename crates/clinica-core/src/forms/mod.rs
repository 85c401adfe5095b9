//! Form drafts and their validators.

pub mod appointment;
pub mod auth;
pub mod patient;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Whether a form creates a new row or edits an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", content = "record", rename_all = "snake_case")]
#[ts(export)]
pub enum FormMode<T> {
    Create,
    Edit(T),
}

impl<T> FormMode<T> {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn existing(&self) -> Option<&T> {
        match self {
            Self::Create => None,
            Self::Edit(record) => Some(record),
        }
    }
}
