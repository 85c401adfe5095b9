//! Path-based route table and the authentication guard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "route", rename_all = "snake_case")]
#[ts(export)]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Appointments,
    Patients,
    PatientIntakes { patient_id: Uuid },
    Profiles,
    Plans,
    Products,
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, CoreError> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["dashboard"] => Self::Dashboard,
            ["agendamentos"] => Self::Appointments,
            ["pacientes"] => Self::Patients,
            ["pacientes", id, "anamneses"] => Self::PatientIntakes {
                patient_id: Uuid::parse_str(id)?,
            },
            ["perfis"] => Self::Profiles,
            ["planos"] => Self::Plans,
            ["produtos"] => Self::Products,
            _ => return Err(CoreError::UnknownRoute(path.to_string())),
        };
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Appointments => "/agendamentos".to_string(),
            Self::Patients => "/pacientes".to_string(),
            Self::PatientIntakes { patient_id } => format!("/pacientes/{patient_id}/anamneses"),
            Self::Profiles => "/perfis".to_string(),
            Self::Plans => "/planos".to_string(),
            Self::Products => "/produtos".to_string(),
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Login)
    }
}

/// The route actually shown when `requested` is visited.
///
/// Anonymous visitors land on the login page; signed-in users are sent
/// from the login page and the root to the dashboard.
pub fn guard(requested: Route, authenticated: bool) -> Route {
    match (requested, authenticated) {
        (Route::Root | Route::Login, true) => Route::Dashboard,
        (route, true) => route,
        (_, false) => Route::Login,
    }
}
