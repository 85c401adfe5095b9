use std::sync::Arc;

use jiff::tz::TimeZone;
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use clinica_audit::events::{AuditAction, AuditEvent};
use clinica_audit::sink::{AuditSink, TracingSink};
use clinica_auth::provider::AuthProvider;
use clinica_auth::session::Session;
use clinica_core::routes::Route;
use clinica_storage::backend::Backend;

use crate::error::AppError;
use crate::navigation::{NavState, Navigator};
use crate::notify::{Notification, Notifier};

/// The signed-in user together with the tenant the session acts for.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub session: Session,
    pub tenant_id: Uuid,
}

/// Explicit owner of the current session. Started on sign-in, cleared on
/// sign-out; every tenant-scoped operation reads its ids from here.
#[derive(Debug)]
pub struct SessionContext {
    tx: watch::Sender<Option<ActiveSession>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn start(&self, session: Session, tenant_id: Uuid) {
        info!(user_id = %session.user.id, %tenant_id, "session started");
        self.tx.send_replace(Some(ActiveSession { session, tenant_id }));
    }

    pub fn clear(&self) {
        if self.tx.send_replace(None).is_some() {
            info!("session cleared");
        }
    }

    pub fn current(&self) -> Option<ActiveSession> {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn tenant_id(&self) -> Result<Uuid, AppError> {
        self.tx
            .borrow()
            .as_ref()
            .map(|active| active.tenant_id)
            .ok_or(AppError::MissingContext("ID da empresa"))
    }

    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.tx
            .borrow()
            .as_ref()
            .map(|active| active.session.user.id)
            .ok_or(AppError::MissingContext("ID do usuário"))
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ActiveSession>> {
        self.tx.subscribe()
    }
}

/// Everything a page needs: collaborators, session, navigation and the
/// time zone the calendar is rendered in.
pub struct AppContext<B, A> {
    backend: Arc<B>,
    auth: Arc<A>,
    notifier: Arc<dyn Notifier>,
    audit: Arc<dyn AuditSink>,
    session: SessionContext,
    navigator: Navigator,
    time_zone: TimeZone,
}

impl<B: Backend, A: AuthProvider> AppContext<B, A> {
    pub fn new(backend: Arc<B>, auth: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            auth,
            notifier,
            audit: Arc::new(TracingSink),
            session: SessionContext::new(),
            navigator: Navigator::new(),
            time_zone: TimeZone::system(),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Navigate with the guard applied for the current session.
    pub fn navigate(&self, route: Route, state: Option<NavState>) -> Route {
        self.navigator
            .navigate(route, state, self.session.is_authenticated())
    }

    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// Log `err` and raise a destructive toast. `action` completes the
    /// sentence "Ocorreu um erro ao ...".
    pub fn report(&self, action: &str, err: &AppError) {
        error!(error = %err, action, "operation failed");
        let description = match err {
            AppError::MissingContext(_) => err.user_message(),
            _ => format!("Ocorreu um erro ao {action}: {}", err.user_message()),
        };
        self.notify(Notification::failure("Erro", description));
    }

    /// Record a mutation made by the current user.
    pub fn audit(&self, action: AuditAction, table: &str, id: impl ToString) {
        let mut event = AuditEvent::new(action, table, id.to_string());
        if let Some(active) = self.session.current() {
            event = event.by(active.tenant_id, active.session.user.id);
        }
        self.audit.record(event);
    }
}
