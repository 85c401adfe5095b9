use std::collections::HashMap;

use jiff::civil::{Date, Time};
use tracing::info;
use uuid::Uuid;

use clinica_audit::events::AuditAction;
use clinica_auth::provider::AuthProvider;
use clinica_core::calendar::{self, WeekGrid};
use clinica_core::forms::appointment::{validate_appointment, AppointmentDraft};
use clinica_core::models::appointment::Appointment;
use clinica_core::models::patient::Patient;
use clinica_core::tables::{self, column};
use clinica_core::validation::FieldErrors;
use clinica_storage::backend::Backend;
use clinica_storage::rows::{self, tenant_scoped};

use crate::context::AppContext;
use crate::error::AppError;
use crate::notify::Notification;

/// Shown for appointments whose patient is not in the tenant's list.
pub const UNKNOWN_PATIENT: &str = "Cliente não encontrado";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppointmentsView {
    #[default]
    Calendar,
    List,
}

/// The booking side panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPanel {
    pub draft: AppointmentDraft,
    pub errors: FieldErrors,
}

#[derive(Debug)]
pub struct AppointmentsPage {
    view: AppointmentsView,
    anchor: Date,
    week: Vec<Appointment>,
    all: Vec<Appointment>,
    patient_names: HashMap<Uuid, String>,
    patients: Vec<Patient>,
    panel: Option<BookingPanel>,
}

impl AppointmentsPage {
    /// Calendar view of the week containing `today`.
    pub fn new(today: Date) -> Self {
        Self {
            view: AppointmentsView::Calendar,
            anchor: today,
            week: Vec::new(),
            all: Vec::new(),
            patient_names: HashMap::new(),
            patients: Vec::new(),
            panel: None,
        }
    }

    pub fn view(&self) -> AppointmentsView {
        self.view
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn week_appointments(&self) -> &[Appointment] {
        &self.week
    }

    pub fn all_appointments(&self) -> &[Appointment] {
        &self.all
    }

    /// Patients offered in the booking panel.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn panel(&self) -> Option<&BookingPanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut BookingPanel> {
        self.panel.as_mut()
    }

    pub fn patient_name(&self, appointment: &Appointment) -> &str {
        self.patient_names
            .get(&appointment.subject_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PATIENT)
    }

    /// Lay the loaded week out on the slot grid.
    pub fn grid<B: Backend, A: AuthProvider>(
        &self,
        ctx: &AppContext<B, A>,
    ) -> Result<WeekGrid<'_>, AppError> {
        Ok(WeekGrid::build(self.anchor, ctx.time_zone(), &self.week)?)
    }

    pub fn month_label(&self) -> String {
        calendar::month_label(self.anchor)
    }

    /// Load the tenant's patients for the name join and the booking panel.
    pub async fn load_patients<B: Backend, A: AuthProvider>(
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
                self.patient_names = patients_by_id(&patients);
                self.patients = patients;
                Ok(())
            }
            Err(e) => {
                ctx.report("buscar os pacientes", &e);
                Err(e)
            }
        }
    }

    /// Load appointments of the displayed week: `[Sunday 00:00, next Sunday 00:00)`.
    pub async fn fetch_week<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        let result = async {
            let tenant_id = ctx.session().tenant_id()?;
            let (from, to) = calendar::week_range(self.anchor, ctx.time_zone())?;
            let query = tenant_scoped(tables::APPOINTMENTS, tenant_id)
                .gte(column::SCHEDULED_AT, from)
                .lt(column::SCHEDULED_AT, to)
                .order(column::SCHEDULED_AT, true);
            Ok::<_, AppError>(rows::select_rows(ctx.backend(), &query).await?)
        }
        .await;

        match result {
            Ok(week) => {
                self.week = week;
                Ok(())
            }
            Err(e) => {
                ctx.report("buscar os agendamentos", &e);
                Err(e)
            }
        }
    }

    /// Load every appointment of the tenant for the list view, by date.
    pub async fn fetch_all<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        let result = async {
            let tenant_id = ctx.session().tenant_id()?;
            let query = tenant_scoped(tables::APPOINTMENTS, tenant_id)
                .order(column::SCHEDULED_AT, true);
            Ok::<_, AppError>(rows::select_rows(ctx.backend(), &query).await?)
        }
        .await;

        match result {
            Ok(all) => {
                self.all = all;
                Ok(())
            }
            Err(e) => {
                ctx.report("buscar os agendamentos", &e);
                Err(e)
            }
        }
    }

    pub async fn show_calendar<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        self.view = AppointmentsView::Calendar;
        self.fetch_week(ctx).await
    }

    pub async fn show_list<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        self.view = AppointmentsView::List;
        self.fetch_all(ctx).await
    }

    pub async fn previous_week<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        self.anchor = calendar::previous_week(self.anchor)?;
        self.fetch_week(ctx).await
    }

    pub async fn next_week<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        self.anchor = calendar::next_week(self.anchor)?;
        self.fetch_week(ctx).await
    }

    /// Open the panel with the clicked cell preselected.
    pub fn click_slot(&mut self, date: Date, time: Time) {
        self.panel = Some(BookingPanel {
            draft: AppointmentDraft::for_slot(date, time),
            errors: FieldErrors::new(),
        });
    }

    /// Open the panel without a slot ("Novo Agendamento").
    pub fn open_panel(&mut self) {
        self.panel = Some(BookingPanel::default());
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    /// Book the panel's slot as a pending appointment for the current user.
    ///
    /// Slots are not checked for existing bookings.
    pub async fn confirm<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<Appointment, AppError> {
        let Some(panel) = self.panel.as_mut() else {
            return Err(AppError::Unknown("booking panel is closed".to_string()));
        };

        let session = ctx.session();
        let ids = session
            .tenant_id()
            .and_then(|tenant| session.user_id().map(|user| (tenant, user)));
        let (tenant_id, user_id) = match ids {
            Ok(ids) => ids,
            Err(e) => {
                ctx.report("criar o agendamento", &e);
                return Err(e);
            }
        };

        let new = match validate_appointment(&panel.draft, tenant_id, user_id, ctx.time_zone()) {
            Ok(new) => {
                panel.errors.clear();
                new
            }
            Err(errors) => {
                panel.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
        };

        let saved: Appointment =
            match rows::insert_row(ctx.backend(), tables::APPOINTMENTS, &new).await {
                Ok(saved) => saved,
                Err(e) => {
                    let e = AppError::from(e);
                    ctx.report("criar o agendamento", &e);
                    return Err(e);
                }
            };

        ctx.audit(AuditAction::Create, tables::APPOINTMENTS, saved.id);
        ctx.notify(Notification::success(
            "Agendamento criado",
            "O agendamento foi criado com sucesso.",
        ));
        info!(appointment_id = %saved.id, "appointment booked");

        self.panel = None;
        let _ = self.fetch_week(ctx).await;
        Ok(saved)
    }
}

fn patients_by_id(patients: &[Patient]) -> HashMap<Uuid, String> {
    patients
        .iter()
        .map(|p| (p.id, p.details.name.clone()))
        .collect()
}
