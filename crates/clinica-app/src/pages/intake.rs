use tracing::info;
use uuid::Uuid;

use clinica_audit::events::AuditAction;
use clinica_auth::provider::AuthProvider;
use clinica_core::intake::IntakeForm;
use clinica_core::models::intake::IntakeRecord;
use clinica_core::routes::Route;
use clinica_core::tables::{self, column};
use clinica_storage::backend::Backend;
use clinica_storage::rows::{self, tenant_scoped};

use crate::context::AppContext;
use crate::error::AppError;
use crate::notify::Notification;

/// Persist a completed intake.
///
/// Only a form on its last step with no save in flight can be submitted;
/// anything else returns [`AppError::NotSubmittable`] without touching the
/// backend or raising a toast. The form is validated next; field errors stay on the form and nothing
/// is written. The record's tenant and subject always come from `tenant_id`
/// and `subject_id`, never from the form. Either one missing aborts with
/// [`AppError::MissingContext`]. On success `on_done` runs once with the
/// stored record. On a backend failure a toast carries the cause and the
/// form keeps every value so the user can resubmit.
pub async fn submit_intake<B, A, F>(
    ctx: &AppContext<B, A>,
    form: &mut IntakeForm,
    tenant_id: Option<Uuid>,
    subject_id: Option<Uuid>,
    on_done: F,
) -> Result<IntakeRecord, AppError>
where
    B: Backend,
    A: AuthProvider,
    F: FnOnce(&IntakeRecord),
{
    if !form.can_submit() {
        return Err(AppError::NotSubmittable);
    }
    let content = form.validate()?;

    let (Some(tenant_id), Some(subject_id)) = (tenant_id, subject_id) else {
        let e = AppError::MissingContext("ID da empresa ou do paciente");
        ctx.report("salvar a anamnese", &e);
        return Err(e);
    };

    form.set_submitting(true);
    let new_record = content.into_record(tenant_id, subject_id);
    let result: Result<IntakeRecord, AppError> =
        rows::insert_row(ctx.backend(), tables::INTAKES, &new_record)
            .await
            .map_err(AppError::from);
    form.set_submitting(false);

    match result {
        Ok(record) => {
            ctx.audit(AuditAction::Create, tables::INTAKES, record.id);
            ctx.notify(Notification::success(
                "Anamnese salva",
                "A anamnese foi salva com sucesso.",
            ));
            info!(intake_id = %record.id, %subject_id, "intake saved");
            on_done(&record);
            Ok(record)
        }
        Err(e) => {
            ctx.report("salvar a anamnese", &e);
            Err(e)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeView {
    List,
    New(Box<IntakeForm>),
    /// Read-only view of a stored record.
    View(Box<IntakeRecord>),
}

/// Intake records of one patient.
#[derive(Debug)]
pub struct IntakePage {
    patient_id: Uuid,
    patient_name: String,
    records: Vec<IntakeRecord>,
    view: IntakeView,
}

impl IntakePage {
    pub fn new(patient_id: Uuid, patient_name: impl Into<String>) -> Self {
        Self {
            patient_id,
            patient_name: patient_name.into(),
            records: Vec::new(),
            view: IntakeView::List,
        }
    }

    /// Build the page from the current location. The patient's name must
    /// have been passed along with the navigation.
    pub fn from_location<B: Backend, A: AuthProvider>(
        ctx: &AppContext<B, A>,
    ) -> Result<Self, AppError> {
        let location = ctx.navigator().current();
        let Route::PatientIntakes { patient_id } = location.route else {
            return Err(AppError::MissingContext("Paciente"));
        };
        let name = location
            .state
            .and_then(|state| state.patient_name)
            .ok_or(AppError::MissingContext("Paciente"))?;
        Ok(Self::new(patient_id, name))
    }

    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn records(&self) -> &[IntakeRecord] {
        &self.records
    }

    pub fn view(&self) -> &IntakeView {
        &self.view
    }

    pub fn form_mut(&mut self) -> Option<&mut IntakeForm> {
        match &mut self.view {
            IntakeView::New(form) => Some(&mut **form),
            _ => None,
        }
    }

    /// Reload this patient's records, newest first.
    pub async fn fetch<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        let result = async {
            let tenant_id = ctx.session().tenant_id()?;
            let query = tenant_scoped(tables::INTAKES, tenant_id)
                .eq(column::PATIENT_ID, self.patient_id)
                .order(column::CREATED_AT, false);
            Ok::<_, AppError>(rows::select_rows(ctx.backend(), &query).await?)
        }
        .await;

        match result {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                ctx.report("buscar as anamneses", &e);
                Err(e)
            }
        }
    }

    /// Start a fresh intake on the first step.
    pub fn new_intake<B: Backend, A: AuthProvider>(&mut self, ctx: &AppContext<B, A>) {
        let tenant_id = ctx.session().tenant_id().ok();
        self.view = IntakeView::New(Box::new(IntakeForm::new(tenant_id, self.patient_id)));
    }

    pub fn view_record(&mut self, record: IntakeRecord) {
        self.view = IntakeView::View(Box::new(record));
    }

    pub fn back(&mut self) {
        self.view = IntakeView::List;
    }

    pub fn back_to_patients<B: Backend, A: AuthProvider>(&self, ctx: &AppContext<B, A>) -> Route {
        ctx.navigate(Route::Patients, None)
    }

    /// Submit the open form; on success return to a refreshed list.
    pub async fn submit<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<IntakeRecord, AppError> {
        let IntakeView::New(form) = &mut self.view else {
            return Err(AppError::Unknown("no intake form is open".to_string()));
        };

        let mut done = false;
        let tenant_id = ctx.session().tenant_id().ok();
        let subject_id = Some(self.patient_id);
        let record = submit_intake(ctx, &mut **form, tenant_id, subject_id, |_| done = true).await?;

        if done {
            self.view = IntakeView::List;
            let _ = self.fetch(ctx).await;
        }
        Ok(record)
    }
}
