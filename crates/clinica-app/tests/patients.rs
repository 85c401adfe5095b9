mod common;

use clinica_app::error::AppError;
use clinica_app::pages::patients::{PatientsPage, PatientsView};
use clinica_audit::events::AuditAction;
use clinica_core::forms::patient::PatientDraft;
use clinica_core::routes::Route;
use clinica_core::tables;
use clinica_storage::backend::Backend;
use clinica_storage::error::StorageError;
use uuid::Uuid;

use common::{patient_row, Harness};

fn filled_draft(name: &str) -> PatientDraft {
    PatientDraft {
        name: name.to_string(),
        birth_date: "1990-04-12".to_string(),
        national_id: "123.456.789-00".to_string(),
        phone: "(11) 99999-0000".to_string(),
        postal_code: "01001-000".to_string(),
        street: "Praça da Sé".to_string(),
        number: "100".to_string(),
        district: "Sé".to_string(),
        city: "São Paulo".to_string(),
        ..PatientDraft::default()
    }
}

#[tokio::test]
async fn fetch_lists_only_the_tenants_patients_by_name() {
    let (h, tenant_id) = Harness::signed_in().await;
    h.seed_patient(tenant_id, "Bruno").await;
    h.seed_patient(tenant_id, "Ana").await;
    h.seed_patient(Uuid::new_v4(), "Carla").await;

    let mut page = PatientsPage::new();
    page.fetch(&h.ctx).await.unwrap();

    let names: Vec<&str> = page
        .patients()
        .iter()
        .map(|p| p.details.name.as_str())
        .collect();
    assert_eq!(names, ["Ana", "Bruno"]);
}

#[tokio::test]
async fn create_persists_with_session_tenant_and_returns_to_list() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let mut page = PatientsPage::new();
    page.open_new();
    page.form_mut().unwrap().draft = filled_draft("  Ana Souza ");

    let saved = page.save(&h.ctx).await.unwrap();

    assert_eq!(saved.tenant_id, tenant_id);
    assert_eq!(saved.details.name, "Ana Souza");
    assert_eq!(page.view(), &PatientsView::List);
    assert_eq!(page.patients().len(), 1);

    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Paciente criado");
    assert!(!toasts[0].is_failure());

    let events = h.audit.events();
    let created = events.last().unwrap();
    assert_eq!(created.action, AuditAction::Create);
    assert_eq!(created.resource_type, tables::PATIENTS);
    assert_eq!(created.tenant_id, Some(tenant_id));
}

#[tokio::test]
async fn invalid_form_keeps_errors_inline_without_toast() {
    let (mut h, _) = Harness::signed_in().await;
    let mut page = PatientsPage::new();
    page.open_new();

    let err = page.save(&h.ctx).await.unwrap_err();

    assert!(err.is_validation());
    let form = page.form().unwrap();
    assert_eq!(form.errors.get("name"), Some("Campo obrigatório"));
    assert!(h.drain_toasts().is_empty());
    assert!(h.backend.rows(tables::PATIENTS).await.is_empty());
}

#[tokio::test]
async fn edit_updates_the_existing_row() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    h.seed_patient(tenant_id, "Ana").await;
    let mut page = PatientsPage::new();
    page.fetch(&h.ctx).await.unwrap();
    let patient = page.patients()[0].clone();

    page.open_edit(patient.clone());
    let form = page.form_mut().unwrap();
    assert_eq!(form.draft.name, "Ana");
    form.draft.city = "Campinas".to_string();

    let saved = page.save(&h.ctx).await.unwrap();

    assert_eq!(saved.id, patient.id);
    assert_eq!(saved.details.city, "Campinas");
    assert_eq!(page.patients().len(), 1);
    assert_eq!(h.drain_toasts()[0].title, "Paciente atualizado");
}

#[tokio::test]
async fn failed_save_keeps_the_form_open_and_raises_a_failure_toast() {
    let (mut h, _) = Harness::signed_in().await;
    let mut page = PatientsPage::new();
    page.open_new();
    page.form_mut().unwrap().draft = filled_draft("Ana");
    h.backend.set_offline(true);

    let err = page.save(&h.ctx).await.unwrap_err();

    assert!(matches!(err, AppError::Backend(StorageError::Network(_))));
    let form = page.form().unwrap();
    assert_eq!(form.draft.name, "Ana");
    assert!(!form.submitting);
    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].is_failure());
    assert!(toasts[0].description.starts_with("Ocorreu um erro ao criar o paciente"));
}

#[tokio::test]
async fn delete_removes_the_patient_with_one_success_toast() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let id = h.seed_patient(tenant_id, "Ana").await;
    h.seed_patient(tenant_id, "Bruno").await;
    let mut page = PatientsPage::new();
    page.fetch(&h.ctx).await.unwrap();

    page.delete(&h.ctx, id).await.unwrap();

    assert!(page.patients().iter().all(|p| p.id != id));
    assert_eq!(page.patients().len(), 1);
    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Paciente excluído");
    assert_eq!(toasts[0].description, "O paciente foi excluído com sucesso.");
}

#[tokio::test]
async fn delete_cannot_reach_another_tenants_patient() {
    let (mut h, _) = Harness::signed_in().await;
    let foreign = h
        .backend
        .insert(tables::PATIENTS, patient_row(Uuid::new_v4(), "Carla"))
        .await
        .unwrap();
    let foreign_id: Uuid = foreign["id"].as_str().unwrap().parse().unwrap();
    let mut page = PatientsPage::new();

    let err = page.delete(&h.ctx, foreign_id).await.unwrap_err();

    assert!(matches!(err, AppError::Backend(StorageError::NotFound { .. })));
    assert_eq!(h.backend.rows(tables::PATIENTS).await.len(), 1);
    assert!(h.drain_toasts()[0].is_failure());
}

#[tokio::test]
async fn fetch_without_session_reports_missing_tenant() {
    let mut h = Harness::new();
    let mut page = PatientsPage::new();

    let err = page.fetch(&h.ctx).await.unwrap_err();

    assert!(matches!(err, AppError::MissingContext(_)));
    let toasts = h.drain_toasts();
    assert_eq!(toasts[0].description, "ID da empresa não encontrado");
}

#[tokio::test]
async fn view_intakes_navigates_with_the_patient_name() {
    let (h, tenant_id) = Harness::signed_in().await;
    h.seed_patient(tenant_id, "Ana").await;
    let mut page = PatientsPage::new();
    page.fetch(&h.ctx).await.unwrap();
    let patient = page.patients()[0].clone();

    let shown = page.view_intakes(&h.ctx, &patient);

    assert_eq!(shown, Route::PatientIntakes { patient_id: patient.id });
    let location = h.ctx.navigator().current();
    assert_eq!(location.state.unwrap().patient_name.as_deref(), Some("Ana"));
}
