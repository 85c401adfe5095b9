mod common;

use clinica_app::error::AppError;
use clinica_app::navigation::NavState;
use clinica_app::pages::intake::{submit_intake, IntakePage, IntakeView};
use clinica_core::intake::{IntakeField, IntakeForm, IntakeStep, StepAction};
use clinica_core::routes::Route;
use clinica_core::tables;
use uuid::Uuid;

use common::Harness;

fn completed_form(tenant_id: Option<Uuid>, subject_id: Uuid) -> IntakeForm {
    let mut form = IntakeForm::new(tenant_id, subject_id);
    form.set(IntakeField::ChiefComplaint, " Dor de cabeça ");
    form.set(IntakeField::IllnessHistory, "Há três dias");
    form.dispatch(StepAction::Next);
    form.set(IntakeField::Allergies, "");
    form.dispatch(StepAction::Next);
    form.set(IntakeField::Temperature, "37.2");
    form
}

#[tokio::test]
async fn submit_persists_with_context_ids_and_calls_back_once() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let subject_id = Uuid::new_v4();
    let mut form = completed_form(Some(tenant_id), subject_id);
    form.draft_mut().tenant_id = Some(Uuid::new_v4());
    form.draft_mut().subject_id = Some(Uuid::new_v4());

    let mut calls = 0;
    let record = submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(subject_id), |_| {
        calls += 1
    })
    .await
    .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(record.tenant_id, tenant_id);
    assert_eq!(record.subject_id, subject_id);
    assert_eq!(record.content.chief_complaint, "Dor de cabeça");
    assert_eq!(record.content.allergies, None);
    assert_eq!(record.content.vital_signs.temperature.as_deref(), Some("37.2"));

    let rows = h.backend.rows(tables::INTAKES).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["empresa_id"], tenant_id.to_string());
    assert_eq!(rows[0]["paciente_id"], subject_id.to_string());
    assert!(rows[0]["sinais_vitais"].is_object());
    assert!(rows[0]["sinais_vitais"]["pressao_arterial"].is_null());

    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Anamnese salva");
}

#[tokio::test]
async fn backend_failure_keeps_values_and_raises_one_failure_toast() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let subject_id = Uuid::new_v4();
    let mut form = completed_form(Some(tenant_id), subject_id);
    let before = form.draft().clone();
    h.backend.set_offline(true);

    let mut called = false;
    let err = submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(subject_id), |_| {
        called = true
    })
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Backend(_)));
    assert!(!called);
    assert_eq!(form.draft(), &before);
    assert_eq!(form.step(), IntakeStep::PhysicalExam);
    assert!(!form.is_submitting());

    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].is_failure());
    assert!(toasts[0].description.starts_with("Ocorreu um erro ao salvar a anamnese"));

    h.backend.set_offline(false);
    assert!(h.backend.rows(tables::INTAKES).await.is_empty());
}

#[tokio::test]
async fn missing_identifiers_abort_without_writing() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let mut form = completed_form(Some(tenant_id), Uuid::new_v4());

    let err = submit_intake(&h.ctx, &mut form, None, Some(Uuid::new_v4()), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingContext(_)));
    assert!(h.backend.rows(tables::INTAKES).await.is_empty());
    assert!(h.drain_toasts()[0].is_failure());
}

#[tokio::test]
async fn submit_is_refused_before_the_last_step_and_while_saving() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let subject_id = Uuid::new_v4();

    let mut form = IntakeForm::new(Some(tenant_id), subject_id);
    form.set(IntakeField::ChiefComplaint, "Dor lombar");
    form.set(IntakeField::IllnessHistory, "Uma semana");
    assert_eq!(form.step(), IntakeStep::Complaint);

    let mut called = false;
    let err = submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(subject_id), |_| {
        called = true
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotSubmittable));

    form.dispatch(StepAction::Next);
    form.dispatch(StepAction::Next);
    form.set_submitting(true);
    let err = submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(subject_id), |_| {
        called = true
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotSubmittable));
    assert!(form.is_submitting());

    assert!(!called);
    assert!(h.backend.rows(tables::INTAKES).await.is_empty());
    assert!(h.drain_toasts().is_empty());

    form.set_submitting(false);
    submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(subject_id), |_| {})
        .await
        .unwrap();
    assert_eq!(h.backend.rows(tables::INTAKES).await.len(), 1);
}

#[tokio::test]
async fn validation_errors_stay_on_the_form() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let mut form = IntakeForm::new(Some(tenant_id), Uuid::new_v4());
    form.dispatch(StepAction::Next);
    form.dispatch(StepAction::Next);

    let err = submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(Uuid::new_v4()), |_| {})
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(form.error(IntakeField::ChiefComplaint).is_some());
    assert!(form.error(IntakeField::IllnessHistory).is_some());
    assert!(h.drain_toasts().is_empty());
}

#[tokio::test]
async fn page_requires_the_patient_name_in_navigation_state() {
    let (h, _) = Harness::signed_in().await;
    let patient_id = Uuid::new_v4();

    h.ctx.navigate(Route::PatientIntakes { patient_id }, None);
    assert!(matches!(
        IntakePage::from_location(&h.ctx),
        Err(AppError::MissingContext(_))
    ));

    h.ctx
        .navigate(Route::PatientIntakes { patient_id }, Some(NavState::patient("Ana")));
    let page = IntakePage::from_location(&h.ctx).unwrap();
    assert_eq!(page.patient_id(), patient_id);
    assert_eq!(page.patient_name(), "Ana");
}

#[tokio::test]
async fn page_submit_returns_to_a_refreshed_list() {
    let (h, tenant_id) = Harness::signed_in().await;
    let patient_id = Uuid::new_v4();
    let mut page = IntakePage::new(patient_id, "Ana");

    page.new_intake(&h.ctx);
    let form = page.form_mut().unwrap();
    assert_eq!(form.step(), IntakeStep::Complaint);
    form.set(IntakeField::ChiefComplaint, "Insônia");
    form.set(IntakeField::IllnessHistory, "Desde janeiro");

    let err = page.submit(&h.ctx).await.unwrap_err();
    assert!(matches!(err, AppError::NotSubmittable));
    assert!(matches!(page.view(), IntakeView::New(_)));

    let form = page.form_mut().unwrap();
    form.dispatch(StepAction::Next);
    form.dispatch(StepAction::Next);
    let record = page.submit(&h.ctx).await.unwrap();

    assert_eq!(page.view(), &IntakeView::List);
    assert_eq!(page.records().len(), 1);
    assert_eq!(page.records()[0].id, record.id);
    assert_eq!(record.tenant_id, tenant_id);

    page.view_record(record.clone());
    assert!(matches!(page.view(), IntakeView::View(_)));
    page.back();
    assert_eq!(page.view(), &IntakeView::List);
}

#[tokio::test]
async fn fetch_lists_newest_first() {
    let (h, tenant_id) = Harness::signed_in().await;
    let patient_id = Uuid::new_v4();
    let mut page = IntakePage::new(patient_id, "Ana");

    for complaint in ["Primeira", "Segunda"] {
        let mut form = IntakeForm::new(Some(tenant_id), patient_id);
        form.set(IntakeField::ChiefComplaint, complaint);
        form.set(IntakeField::IllnessHistory, "x");
        form.dispatch(StepAction::Next);
        form.dispatch(StepAction::Next);
        submit_intake(&h.ctx, &mut form, Some(tenant_id), Some(patient_id), |_| {})
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    page.fetch(&h.ctx).await.unwrap();

    let complaints: Vec<&str> = page
        .records()
        .iter()
        .map(|r| r.content.chief_complaint.as_str())
        .collect();
    assert_eq!(complaints, ["Segunda", "Primeira"]);
}
