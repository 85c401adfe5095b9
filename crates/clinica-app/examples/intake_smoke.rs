//! Smoke test for the front-desk flow, fully in memory.
//!
//! Registers a tenant, signs in, creates a patient, records an intake and
//! then repeats the submission with the backend offline to show that the
//! form survives a failed save.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p clinica-app --example intake_smoke

use std::sync::Arc;

use clinica_app::context::AppContext;
use clinica_app::notify::LogNotifier;
use clinica_app::pages::auth;
use clinica_app::pages::intake::IntakePage;
use clinica_app::pages::patients::PatientsPage;
use clinica_auth::memory::MemoryAuthProvider;
use clinica_core::forms::auth::{LoginDraft, TenantRegistrationDraft};
use clinica_core::forms::patient::PatientDraft;
use clinica_core::intake::{IntakeField, StepAction};
use clinica_storage::memory::MemoryBackend;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let backend = Arc::new(MemoryBackend::new());
    let auth_provider = Arc::new(MemoryAuthProvider::new(b"smoke-secret".to_vec()));
    let ctx = AppContext::new(backend.clone(), auth_provider, Arc::new(LogNotifier));

    println!("Registering tenant...");
    let tenant = auth::register_tenant(
        &ctx,
        &TenantRegistrationDraft {
            name: "Clínica Demonstração".to_string(),
            industry: "psicologia".to_string(),
            email: "admin@demo.test".to_string(),
            password: "demo1234".to_string(),
        },
    )
    .await?;
    println!("  Tenant: {} ({})", tenant.name, tenant.id);

    println!("Signing in...");
    let active = auth::login(
        &ctx,
        &LoginDraft {
            email: "admin@demo.test".to_string(),
            password: "demo1234".to_string(),
        },
    )
    .await?;
    println!("  User:   {}", active.session.user.id);
    println!("  Route:  {}", ctx.navigator().current().route.path());

    println!("Creating patient...");
    let mut patients = PatientsPage::new();
    patients.open_new();
    if let Some(form) = patients.form_mut() {
        form.draft = PatientDraft {
            name: "Joana Prado".to_string(),
            birth_date: "1988-07-03".to_string(),
            national_id: "111.222.333-44".to_string(),
            phone: "(21) 98888-7777".to_string(),
            postal_code: "20040-020".to_string(),
            street: "Avenida Rio Branco".to_string(),
            number: "156".to_string(),
            district: "Centro".to_string(),
            city: "Rio de Janeiro".to_string(),
            ..PatientDraft::default()
        };
    }
    let patient = patients.save(&ctx).await?;
    println!("  Patient: {} ({})", patient.details.name, patient.id);

    patients.view_intakes(&ctx, &patient);
    let mut intakes = IntakePage::from_location(&ctx)?;

    println!("Recording intake...");
    intakes.new_intake(&ctx);
    if let Some(form) = intakes.form_mut() {
        form.set(IntakeField::ChiefComplaint, "Ansiedade");
        form.set(IntakeField::IllnessHistory, "Piora nas últimas semanas");
        form.dispatch(StepAction::Next);
        form.set(IntakeField::Medications, "Nenhuma");
        form.dispatch(StepAction::Next);
        form.set(IntakeField::BloodPressure, "120/80");
    }
    let record = intakes.submit(&ctx).await?;
    println!("  Intake: {} ({} on file)", record.id, intakes.records().len());

    println!("Submitting with the backend offline...");
    intakes.new_intake(&ctx);
    if let Some(form) = intakes.form_mut() {
        form.set(IntakeField::ChiefComplaint, "Retorno");
        form.set(IntakeField::IllnessHistory, "Sem queixas novas");
        form.dispatch(StepAction::Next);
        form.dispatch(StepAction::Next);
    }
    backend.set_offline(true);
    match intakes.submit(&ctx).await {
        Ok(_) => println!("  Unexpected success"),
        Err(e) => {
            let kept = intakes
                .form_mut()
                .and_then(|form| form.value(IntakeField::ChiefComplaint).map(str::to_string));
            println!("  Failed as expected: {e}");
            println!("  Form kept chief complaint: {kept:?}");
        }
    }
    backend.set_offline(false);

    auth::sign_out(&ctx).await;
    println!("Signed out; route is {}", ctx.navigator().current().route.path());
    Ok(())
}
