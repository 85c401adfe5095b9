//! Table and column naming conventions of the hosted database.
//!
//! Pure string constants. These define the canonical names the backend
//! expects; row types serialise to the same column names.

pub const TENANTS: &str = "empresas";
pub const PATIENTS: &str = "pacientes";
pub const APPOINTMENTS: &str = "agendamentos";
pub const PROFILES: &str = "perfis";
pub const PLANS: &str = "planos";
pub const PRODUCTS: &str = "produtos";
pub const INTAKES: &str = "anamneses";

/// Every table the front end reads or writes.
pub const ALL: [&str; 7] = [
    TENANTS,
    PATIENTS,
    APPOINTMENTS,
    PROFILES,
    PLANS,
    PRODUCTS,
    INTAKES,
];

pub mod column {
    pub const ID: &str = "id";
    pub const TENANT_ID: &str = "empresa_id";
    pub const PATIENT_ID: &str = "paciente_id";
    /// Appointments reference the patient under this name.
    pub const CLIENT_ID: &str = "cliente_id";
    pub const USER_ID: &str = "usuario_id";
    pub const NAME: &str = "nome";
    pub const PRICE: &str = "preco";
    pub const CREATED_AT: &str = "criado_em";
    pub const SCHEDULED_AT: &str = "data_agendamento";
}
