use tracing::info;
use uuid::Uuid;

use clinica_audit::events::AuditAction;
use clinica_auth::provider::AuthProvider;
use clinica_core::forms::patient::{validate_patient, PatientDraft, PatientTab};
use clinica_core::forms::FormMode;
use clinica_core::models::patient::{Patient, PatientInput};
use clinica_core::routes::Route;
use clinica_core::tables::{self, column};
use clinica_core::validation::FieldErrors;
use clinica_storage::backend::Backend;
use clinica_storage::rows::{self, tenant_row, tenant_scoped};

use crate::context::AppContext;
use crate::error::AppError;
use crate::navigation::NavState;
use crate::notify::Notification;

/// The tabbed create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub mode: FormMode<Patient>,
    pub draft: PatientDraft,
    pub tab: PatientTab,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl PatientForm {
    fn new(mode: FormMode<Patient>) -> Self {
        let draft = match &mode {
            FormMode::Create => PatientDraft::default(),
            FormMode::Edit(patient) => PatientDraft::from_patient(patient),
        };
        Self {
            mode,
            draft,
            tab: PatientTab::default(),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatientsView {
    List,
    Form(Box<PatientForm>),
}

#[derive(Debug)]
pub struct PatientsPage {
    patients: Vec<Patient>,
    view: PatientsView,
}

impl Default for PatientsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientsPage {
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            view: PatientsView::List,
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn view(&self) -> &PatientsView {
        &self.view
    }

    pub fn form(&self) -> Option<&PatientForm> {
        match &self.view {
            PatientsView::Form(form) => Some(&**form),
            PatientsView::List => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut PatientForm> {
        match &mut self.view {
            PatientsView::Form(form) => Some(&mut **form),
            PatientsView::List => None,
        }
    }

    /// Reload the tenant's patients, ordered by name.
    pub async fn fetch<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        let result = async {
            let tenant_id = ctx.session().tenant_id()?;
            let query = tenant_scoped(tables::PATIENTS, tenant_id).order(column::NAME, true);
            Ok::<_, AppError>(rows::select_rows(ctx.backend(), &query).await?)
        }
        .await;

        match result {
            Ok(patients) => {
                self.patients = patients;
                Ok(())
            }
            Err(e) => {
                ctx.report("buscar os pacientes", &e);
                Err(e)
            }
        }
    }

    pub fn open_new(&mut self) {
        self.view = PatientsView::Form(Box::new(PatientForm::new(FormMode::Create)));
    }

    pub fn open_edit(&mut self, patient: Patient) {
        self.view = PatientsView::Form(Box::new(PatientForm::new(FormMode::Edit(patient))));
    }

    pub fn select_tab(&mut self, tab: PatientTab) {
        if let Some(form) = self.form_mut() {
            form.tab = tab;
        }
    }

    /// Discard the form and return to the list.
    pub fn cancel(&mut self) {
        self.view = PatientsView::List;
    }

    /// Validate and persist the open form, then return to a refreshed list.
    ///
    /// On failure the form stays open with its values intact.
    pub async fn save<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<Patient, AppError> {
        let Some(form) = self.form_mut() else {
            return Err(AppError::Unknown("no patient form is open".to_string()));
        };

        let details = match validate_patient(&form.draft) {
            Ok(details) => {
                form.errors.clear();
                details
            }
            Err(errors) => {
                form.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
        };
        let editing = form.mode.existing().map(|p| p.id);
        let verb = if editing.is_some() { "atualizar" } else { "criar" };

        form.submitting = true;
        let result = async {
            let tenant_id = ctx.session().tenant_id()?;
            let saved: Patient = match editing {
                None => {
                    let input = PatientInput { tenant_id, details };
                    rows::insert_row(ctx.backend(), tables::PATIENTS, &input).await?
                }
                Some(id) => {
                    let query = tenant_row(tables::PATIENTS, tenant_id, id);
                    let mut updated: Vec<Patient> =
                        rows::update_rows(ctx.backend(), &query, &details).await?;
                    updated.swap_remove(0)
                }
            };
            Ok::<_, AppError>(saved)
        }
        .await;
        form.submitting = false;

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                ctx.report(&format!("{verb} o paciente"), &e);
                return Err(e);
            }
        };

        let (action, title, description) = match editing {
            Some(_) => (
                AuditAction::Update,
                "Paciente atualizado",
                "O paciente foi atualizado com sucesso.",
            ),
            None => (
                AuditAction::Create,
                "Paciente criado",
                "O paciente foi criado com sucesso.",
            ),
        };
        ctx.audit(action, tables::PATIENTS, saved.id);
        ctx.notify(Notification::success(title, description));
        info!(patient_id = %saved.id, "patient saved");

        self.view = PatientsView::List;
        // A failed refetch is reported on its own; the save itself succeeded.
        let _ = self.fetch(ctx).await;
        Ok(saved)
    }

    /// Delete immediately and refetch. There is no confirmation step and no
    /// soft delete; the delete is restricted to the session's tenant.
    pub async fn delete<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
        patient_id: Uuid,
    ) -> Result<(), AppError> {
        let result = async {
            let tenant_id = ctx.session().tenant_id()?;
            let query = tenant_row(tables::PATIENTS, tenant_id, patient_id);
            Ok::<_, AppError>(rows::delete_rows(ctx.backend(), &query).await?)
        }
        .await;

        if let Err(e) = result {
            ctx.report("excluir o paciente", &e);
            return Err(e);
        }

        ctx.audit(AuditAction::Delete, tables::PATIENTS, patient_id);
        ctx.notify(Notification::success(
            "Paciente excluído",
            "O paciente foi excluído com sucesso.",
        ));
        let _ = self.fetch(ctx).await;
        Ok(())
    }

    /// Open the patient's intake records.
    pub fn view_intakes<B: Backend, A: AuthProvider>(
        &self,
        ctx: &AppContext<B, A>,
        patient: &Patient,
    ) -> Route {
        ctx.navigate(
            Route::PatientIntakes {
                patient_id: patient.id,
            },
            Some(NavState::patient(&patient.details.name)),
        )
    }
}
