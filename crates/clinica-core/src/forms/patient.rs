use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::patient::{MaritalStatus, Patient, PatientDetails, Sex};
use crate::validation::{self, FieldErrors};

const REQUIRED: &str = "Campo obrigatório";

/// Tabs of the patient form. Every tab's fields are validated together on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PatientTab {
    #[default]
    Personal,
    Contact,
    Complementary,
}

impl PatientTab {
    pub const ALL: [PatientTab; 3] = [Self::Personal, Self::Contact, Self::Complementary];

    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "Dados Pessoais",
            Self::Contact => "Contato e Endereço",
            Self::Complementary => "Informações Complementares",
        }
    }
}

/// Raw values of the patient form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientDraft {
    pub name: String,
    pub birth_date: String,
    pub national_id: String,
    pub rg: String,
    pub sex: String,
    pub marital_status: String,
    pub profession: String,
    pub phone: String,
    pub secondary_phone: String,
    pub email: String,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub insurance: String,
    pub insurance_card_number: String,
    pub insurance_card_expiry: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub notes: String,
}

impl Default for PatientDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            birth_date: String::new(),
            national_id: String::new(),
            rg: String::new(),
            sex: "masculino".to_string(),
            marital_status: String::new(),
            profession: String::new(),
            phone: String::new(),
            secondary_phone: String::new(),
            email: String::new(),
            postal_code: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            district: String::new(),
            city: String::new(),
            insurance: String::new(),
            insurance_card_number: String::new(),
            insurance_card_expiry: String::new(),
            emergency_contact: String::new(),
            emergency_phone: String::new(),
            notes: String::new(),
        }
    }
}

impl PatientDraft {
    /// Prefill the form from an existing patient for editing.
    pub fn from_patient(patient: &Patient) -> Self {
        let d = &patient.details;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: d.name.clone(),
            birth_date: d.birth_date.to_string(),
            national_id: d.national_id.clone(),
            rg: text(&d.rg),
            sex: match d.sex {
                Sex::Male => "masculino",
                Sex::Female => "feminino",
            }
            .to_string(),
            marital_status: d
                .marital_status
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            profession: text(&d.profession),
            phone: d.phone.clone(),
            secondary_phone: text(&d.secondary_phone),
            email: text(&d.email),
            postal_code: d.postal_code.clone(),
            street: d.street.clone(),
            number: d.number.clone(),
            complement: text(&d.complement),
            district: d.district.clone(),
            city: d.city.clone(),
            insurance: text(&d.insurance),
            insurance_card_number: text(&d.insurance_card_number),
            insurance_card_expiry: d
                .insurance_card_expiry
                .map(|date| date.to_string())
                .unwrap_or_default(),
            emergency_contact: text(&d.emergency_contact),
            emergency_phone: text(&d.emergency_phone),
            notes: text(&d.notes),
        }
    }
}

/// Validate the patient form into the details written to `pacientes`.
pub fn validate_patient(draft: &PatientDraft) -> Result<PatientDetails, FieldErrors> {
    let mut errors = FieldErrors::new();
    let e = &mut errors;

    let name = validation::required(e, "name", &draft.name, REQUIRED);
    let birth_date = validation::required_date(e, "birth_date", &draft.birth_date, REQUIRED);
    let national_id = validation::required(e, "national_id", &draft.national_id, REQUIRED);
    let phone = validation::required(e, "phone", &draft.phone, REQUIRED);
    let postal_code = validation::required(e, "postal_code", &draft.postal_code, REQUIRED);
    let street = validation::required(e, "street", &draft.street, REQUIRED);
    let number = validation::required(e, "number", &draft.number, REQUIRED);
    let district = validation::required(e, "district", &draft.district, REQUIRED);
    let city = validation::required(e, "city", &draft.city, REQUIRED);

    let email = validation::optional(Some(&draft.email));
    if let Some(address) = &email
        && !validation::is_email(address)
    {
        e.insert("email", "Email inválido");
    }

    let sex = match draft.sex.trim() {
        "" => Sex::default(),
        other => Sex::parse(other).unwrap_or_else(|| {
            e.insert("sex", "Sexo inválido");
            Sex::default()
        }),
    };

    let marital_status = match validation::optional(Some(&draft.marital_status)) {
        None => None,
        Some(value) => {
            let parsed = MaritalStatus::parse(&value);
            if parsed.is_none() {
                e.insert("marital_status", "Estado civil inválido");
            }
            parsed
        }
    };

    let insurance_card_expiry = validation::optional_date(
        e,
        "insurance_card_expiry",
        Some(&draft.insurance_card_expiry),
    );

    let Some(birth_date) = birth_date else {
        return Err(errors);
    };

    errors.into_result(PatientDetails {
        name,
        birth_date,
        national_id,
        rg: validation::optional(Some(&draft.rg)),
        sex,
        marital_status,
        profession: validation::optional(Some(&draft.profession)),
        phone,
        secondary_phone: validation::optional(Some(&draft.secondary_phone)),
        email,
        postal_code,
        street,
        number,
        complement: validation::optional(Some(&draft.complement)),
        district,
        city,
        insurance: validation::optional(Some(&draft.insurance)),
        insurance_card_number: validation::optional(Some(&draft.insurance_card_number)),
        insurance_card_expiry,
        emergency_contact: validation::optional(Some(&draft.emergency_contact)),
        emergency_phone: validation::optional(Some(&draft.emergency_phone)),
        notes: validation::optional(Some(&draft.notes)),
    })
}
