use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::tenant::NewTenant;
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterDraft {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registers a tenant together with its administrator account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TenantRegistrationDraft {
    pub name: String,
    pub industry: String,
    pub email: String,
    pub password: String,
}

/// Credentials that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRegistration {
    pub tenant: NewTenant,
    pub admin: Credentials,
}

pub fn validate_login(draft: &LoginDraft) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = validation::email(&mut errors, "email", &draft.email);
    let password = validation::password(&mut errors, "password", &draft.password);
    errors.into_result(Credentials { email, password })
}

pub fn validate_register(draft: &RegisterDraft) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = validation::email(&mut errors, "email", &draft.email);
    let password = validation::password(&mut errors, "password", &draft.password);
    if draft.password != draft.confirm_password {
        errors.insert("confirm_password", "As senhas não coincidem");
    }
    errors.into_result(Credentials { email, password })
}

pub fn validate_tenant_registration(
    draft: &TenantRegistrationDraft,
) -> Result<TenantRegistration, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = validation::required(&mut errors, "name", &draft.name, "O nome é obrigatório");
    let industry = validation::required(
        &mut errors,
        "industry",
        &draft.industry,
        "O ramo de atividade é obrigatório",
    );
    let email = validation::email(&mut errors, "email", &draft.email);
    let password = validation::password(&mut errors, "password", &draft.password);

    errors.into_result(TenantRegistration {
        tenant: NewTenant { name, industry },
        admin: Credentials { email, password },
    })
}
